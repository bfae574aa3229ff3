use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DefaultView {
    #[default]
    List,
    Grid,
}

/// Ordering applied to search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Date,
    Relevance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub theme: Theme,
    pub email_notifications: bool,
    pub default_view: DefaultView,
    pub default_sort: SortOrder,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            email_notifications: true,
            default_view: DefaultView::List,
            default_sort: SortOrder::Date,
        }
    }
}

/// Partial preference update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub email_notifications: Option<bool>,
    pub default_view: Option<DefaultView>,
    pub default_sort: Option<SortOrder>,
}

impl UserPreferences {
    /// Shallow merge of the supplied fields
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(email_notifications) = patch.email_notifications {
            self.email_notifications = email_notifications;
        }
        if let Some(default_view) = patch.default_view {
            self.default_view = default_view;
        }
        if let Some(default_sort) = patch.default_sort {
            self.default_sort = default_sort;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.theme, Theme::System);
        assert!(prefs.email_notifications);
        assert_eq!(prefs.default_view, DefaultView::List);
        assert_eq!(prefs.default_sort, SortOrder::Date);
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("grid".parse::<DefaultView>(), Ok(DefaultView::Grid));
        assert_eq!(SortOrder::Relevance.to_string(), "relevance");
        assert_eq!(Theme::System.to_string(), "system");
        assert_eq!("newest".parse::<SortOrder>(), Err(strum::ParseError::VariantNotFound));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesPatch { theme: Some(Theme::Dark), ..Default::default() });
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.email_notifications);
        assert_eq!(prefs.default_sort, SortOrder::Date);
    }
}
