#[derive(Debug, Clone)]
pub struct GetMediaDTO {
    pub key: String,
}
