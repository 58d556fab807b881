//! News Endpoints

use reqwest::Method;

use super::{fetch_json, fetch_list, Api};
use crate::error::ApiError;
use crate::models::{MessageResponse, News, NewsForm};

impl Api {
    pub async fn list_news(&self) -> Result<Vec<News>, ApiError> {
        fetch_list(self.api(Method::GET, "/noticias")).await
    }

    pub async fn get_news(&self, id: u32) -> Result<News, ApiError> {
        fetch_json(self.api(Method::GET, &format!("/noticias/{}", id))).await
    }

    pub async fn create_news(&self, form: &NewsForm) -> Result<News, ApiError> {
        fetch_json(self.api(Method::POST, "/noticias").json(form)).await
    }

    pub async fn update_news(&self, id: u32, form: &NewsForm) -> Result<News, ApiError> {
        fetch_json(self.api(Method::PUT, &format!("/noticias/{}", id)).json(form)).await
    }

    pub async fn delete_news(&self, id: u32) -> Result<MessageResponse, ApiError> {
        fetch_json(self.api(Method::DELETE, &format!("/noticias/{}", id))).await
    }
}
