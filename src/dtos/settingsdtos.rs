use serde::{Deserialize, Serialize};

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateSettingsDto {
    pub site_title: Option<String>,
    pub login_title: Option<String>,
    pub site_description: Option<String>,
    pub header_color: Option<String>,
    pub meta_keywords: Option<String>,
    pub system_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_to_none() {
        let dto: UpdateSettingsDto =
            serde_json::from_value(serde_json::json!({ "login_title": "Student Login Portal" }))
                .unwrap();
        assert_eq!(dto.login_title.as_deref(), Some("Student Login Portal"));
        assert!(dto.site_title.is_none());
        assert!(dto.system_language.is_none());
    }
}
