//! Navigator configuration

use serde::{Deserialize, Serialize};

use pagenav_transitions::DEFAULT_STYLE;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Id of the element pages are mounted into
    pub container: String,
    /// Id of the back control element
    pub back_control: String,
    /// Transition style name; `swipe` when absent or empty
    #[serde(default)]
    pub transition_style: Option<String>,
    /// Class marking page elements
    #[serde(default = "default_page_class")]
    pub page_class: String,
    /// Class marking the initially visible page
    #[serde(default = "default_current_class")]
    pub current_class: String,
    /// Class hiding pages at load time and the back control at the root
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
    /// Attribute carrying a link's destination page id
    #[serde(default = "default_link_attribute")]
    pub link_attribute: String,
}

fn default_page_class() -> String {
    "page-wrapper".to_string()
}

fn default_current_class() -> String {
    "current-view".to_string()
}

fn default_hidden_class() -> String {
    "hidden".to_string()
}

fn default_link_attribute() -> String {
    "data-href".to_string()
}

impl NavigatorConfig {
    pub fn new(container: impl Into<String>, back_control: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            back_control: back_control.into(),
            transition_style: None,
            page_class: default_page_class(),
            current_class: default_current_class(),
            hidden_class: default_hidden_class(),
            link_attribute: default_link_attribute(),
        }
    }

    pub fn with_transition_style(mut self, style: impl Into<String>) -> Self {
        self.transition_style = Some(style.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective transition style
    pub fn transition_style(&self) -> &str {
        self.transition_style
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("container", &self.container),
            ("back_control", &self.back_control),
            ("page_class", &self.page_class),
            ("current_class", &self.current_class),
            ("hidden_class", &self.hidden_class),
            ("link_attribute", &self.link_attribute),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{} cannot be empty", field)));
            }
        }

        Ok(())
    }
}
