use crate::color::Color;
use crate::error::{Error, Result};
use log::info;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const DEFAULT_BAG_NAME: &str = "프리미엄 레더 백팩";

/// A named color choice, written `NAME=#rrggbb` on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub title: String,
    pub hex: String,
}

impl Swatch {
    pub fn new(title: &str, hex: &str) -> Self {
        Swatch {
            title: title.to_string(),
            hex: hex.to_string(),
        }
    }
}

impl FromStr for Swatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (title, hex) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidSwatch(s.to_string()))?;
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidSwatch(s.to_string()));
        }
        Color::from_hex(hex)?;
        Ok(Swatch::new(title, hex.trim()))
    }
}

pub fn default_swatches() -> Vec<Swatch> {
    vec![
        Swatch::new("Black", "#1a1a1a"),
        Swatch::new("Brown", "#8b4513"),
        Swatch::new("Navy", "#1e3a5f"),
        Swatch::new("Red", "#ff0000"),
        Swatch::new("Beige", "#d2b48c"),
    ]
}

/// Color button: a hex value, a title, and the active flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorButton {
    pub swatch: Swatch,
    pub active: bool,
}

/// Message shown until it expires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires: Instant,
}

/// Everything on the page besides the viewer and the slider
#[derive(Debug, Clone)]
pub struct Page {
    pub bag_name: String,
    pub buttons: Vec<ColorButton>,
    pub notification: Option<Notification>,
    notification_ttl: Duration,
}

impl Page {
    /// Creates the page; the first button whose value equals `initial` starts active.
    pub fn new(
        bag_name: &str,
        swatches: Vec<Swatch>,
        initial: Color,
        notification_ttl: Duration,
    ) -> Self {
        let buttons = swatches
            .into_iter()
            .map(|swatch| ColorButton {
                swatch,
                active: false,
            })
            .collect();
        let mut page = Page {
            bag_name: bag_name.to_string(),
            buttons,
            notification: None,
            notification_ttl,
        };
        if let Some(button) = page
            .buttons
            .iter_mut()
            .find(|button| Color::from_hex(&button.swatch.hex).ok() == Some(initial))
        {
            button.active = true;
        }
        page
    }

    pub fn active_button(&self) -> Option<&ColorButton> {
        self.buttons.iter().find(|button| button.active)
    }

    /// Makes the button at `index` the only active one and returns its color.
    pub fn click_color(&mut self, index: usize) -> Result<Option<Color>> {
        let Some(button) = self.buttons.get(index) else {
            return Ok(None);
        };
        let color = Color::from_hex(&button.swatch.hex)?;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.active = i == index;
        }
        info!("color {} ({color}) selected", self.buttons[index].swatch.title);
        Ok(Some(color))
    }

    pub fn view_more(&mut self, product_count: usize, now: Instant) -> &str {
        self.notify(format!("There are {product_count} products in total."), now)
    }

    pub fn add_to_cart(&mut self, now: Instant) -> &str {
        let color = self
            .active_button()
            .map(|button| button.swatch.title.clone())
            .unwrap_or_default();
        info!("added {} ({color}) to the cart", self.bag_name);
        let message = format!(
            "\"{}\" ({color})\nAdded your favourite to the cart! 🎉",
            self.bag_name
        );
        self.notify(message, now)
    }

    fn notify(&mut self, message: String, now: Instant) -> &str {
        let notification = self.notification.insert(Notification {
            message,
            expires: now + self.notification_ttl,
        });
        &notification.message
    }

    /// The notification still on screen at `now`, dropping expired ones.
    pub fn current_notification(&mut self, now: Instant) -> Option<&str> {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| now >= notification.expires)
        {
            self.notification = None;
        }
        self.notification
            .as_ref()
            .map(|notification| notification.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(
            DEFAULT_BAG_NAME,
            default_swatches(),
            Color(0x1a1a1a),
            Duration::from_secs(3),
        )
    }

    #[test]
    fn initial_color_button_starts_active() {
        let page = page();
        assert_eq!(page.active_button().unwrap().swatch.title, "Black");
        let other = Page::new("Bag", default_swatches(), Color(0x123456), Duration::ZERO);
        assert!(other.active_button().is_none());
    }

    #[test]
    fn clicking_a_color_deactivates_the_others() {
        let mut page = page();
        let color = page.click_color(3).unwrap();
        assert_eq!(color, Some(Color(0xff0000)));
        let active: Vec<_> = page.buttons.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].swatch.title, "Red");
        assert_eq!(page.click_color(42).unwrap(), None);
        assert_eq!(page.active_button().unwrap().swatch.title, "Red");
    }

    #[test]
    fn malformed_button_value_is_reported() {
        let mut page = Page::new(
            "Bag",
            vec![Swatch::new("Broken", "#12")],
            Color::BLACK,
            Duration::ZERO,
        );
        assert!(matches!(page.click_color(0), Err(Error::InvalidColor(_))));
        assert!(page.active_button().is_none());
    }

    #[test]
    fn cart_message_names_bag_and_color() {
        let mut page = page();
        page.click_color(3).unwrap();
        let message = page.add_to_cart(Instant::now()).to_string();
        assert!(message.starts_with(&format!("\"{DEFAULT_BAG_NAME}\" (Red)")));
    }

    #[test]
    fn view_more_counts_products() {
        let mut page = page();
        assert_eq!(
            page.view_more(10, Instant::now()),
            "There are 10 products in total."
        );
    }

    #[test]
    fn notifications_expire() {
        let mut page = page();
        let now = Instant::now();
        page.view_more(10, now);
        assert!(page.current_notification(now + Duration::from_secs(2)).is_some());
        assert!(page.current_notification(now + Duration::from_secs(3)).is_none());
        assert!(page.notification.is_none());
    }

    #[test]
    fn parses_swatches() {
        let swatch: Swatch = "Olive=#808000".parse().unwrap();
        assert_eq!(swatch, Swatch::new("Olive", "#808000"));
        assert!(matches!(
            "Olive".parse::<Swatch>(),
            Err(Error::InvalidSwatch(_))
        ));
        assert!(matches!(
            "=#808000".parse::<Swatch>(),
            Err(Error::InvalidSwatch(_))
        ));
        assert!(matches!(
            "Olive=#80800".parse::<Swatch>(),
            Err(Error::InvalidColor(_))
        ));
    }
}
