use serde::{Deserialize, Serialize};

/// The activity currently published by the backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub url: String,
}

impl Activity {
    /// The backend reports a cleared activity as one with an empty id
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Top-level surfaces of the app
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    /// Guarded home surface hosting the activity widget
    #[default]
    Home,
    Login,
}

impl Route {
    pub fn as_str(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_deserializes_pascal_case() {
        let json = r#"{"Id":"dQw4w9WgXcQ","Title":"Song","Author":"Rick","ThumbnailUrl":"https://img/x.jpg","Url":"https://www.youtube.com/watch?v=dQw4w9WgXcQ"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id, "dQw4w9WgXcQ");
        assert_eq!(activity.author, "Rick");
        assert_eq!(activity.thumbnail_url, "https://img/x.jpg");
        assert!(!activity.is_empty());
    }

    #[test]
    fn test_cleared_activity_is_empty() {
        let activity: Activity = serde_json::from_str(r#"{"Id":"","Title":""}"#).unwrap();
        assert!(activity.is_empty());
        assert_eq!(activity.url, "");
    }
}
