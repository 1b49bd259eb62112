use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct NeocitiesResponse {
    pub result: String,
    pub error_type: Option<String>,
    pub message: Option<String>,
}

impl NeocitiesResponse {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }

    pub fn describe(&self) -> String {
        match (&self.error_type, &self.message) {
            (Some(kind), Some(message)) => format!("{kind}: {message}"),
            (None, Some(message)) => message.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => self.result.clone(),
        }
    }
}
