//! Blog articles, taxonomy, comments and favorites

use super::{ApiRequest, ClientError, FileUpload, MultipartForm, PawClient};
use crate::types::{
    ArchiveEntry, Article, ArticleListParams, ArticlePayload, ArticleSummary, Category, Comment,
    NewComment, PageQuery, Paginated, Tag, UploadedImage,
};

const BLOG: &str = "/blog";

/// Blog endpoints under `/blog/`
pub struct BlogApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Blog articles, categories, tags and comments
    pub fn blog(&self) -> BlogApi<'_> {
        BlogApi { client: self }
    }
}

impl BlogApi<'_> {
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/category/")))
            .await
    }

    pub async fn category(&self, id: u64) -> Result<Category, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/category/{id}/")))
            .await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/tag/")))
            .await
    }

    pub async fn popular_tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/tag/popular/")))
            .await
    }

    pub async fn articles(
        &self,
        params: &ArticleListParams,
    ) -> Result<Paginated<ArticleSummary>, ClientError> {
        let req = ApiRequest::get(format!("{BLOG}/article/")).query(params)?;
        self.client.execute(req).await
    }

    pub async fn article(&self, id: u64) -> Result<Article, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/article/{id}/")))
            .await
    }

    pub async fn create_article(&self, article: &ArticlePayload) -> Result<Article, ClientError> {
        let req = ApiRequest::post(format!("{BLOG}/article/")).json(article)?;
        self.client.execute(req).await
    }

    pub async fn update_article(
        &self,
        id: u64,
        article: &ArticlePayload,
    ) -> Result<Article, ClientError> {
        let req = ApiRequest::patch(format!("{BLOG}/article/{id}/")).json(article)?;
        self.client.execute(req).await
    }

    /// Article counts per month
    pub async fn archive(&self) -> Result<Vec<ArchiveEntry>, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{BLOG}/article/archive/")))
            .await
    }

    /// Articles published in `year`/`month`
    pub async fn archive_month(
        &self,
        year: i32,
        month: u32,
        page: &PageQuery,
    ) -> Result<Paginated<ArticleSummary>, ClientError> {
        let req = ApiRequest::get(format!("{BLOG}/article/{year}/{month}/")).query(page)?;
        self.client.execute(req).await
    }

    pub async fn comments(
        &self,
        article_id: u64,
        page: &PageQuery,
    ) -> Result<Paginated<Comment>, ClientError> {
        let req =
            ApiRequest::get(format!("{BLOG}/article/{article_id}/comments/")).query(page)?;
        self.client.execute(req).await
    }

    /// Comment on an article, or reply to the comment `parent`
    pub async fn add_comment(
        &self,
        article_id: u64,
        comment: &NewComment,
    ) -> Result<Comment, ClientError> {
        let req =
            ApiRequest::post(format!("{BLOG}/article/{article_id}/add_comment/")).json(comment)?;
        self.client.execute(req).await
    }

    pub async fn my_articles(
        &self,
        page: &PageQuery,
    ) -> Result<Paginated<ArticleSummary>, ClientError> {
        let req = ApiRequest::get(format!("{BLOG}/article/my_articles/")).query(page)?;
        self.client.execute(req).await
    }

    pub async fn favorites(
        &self,
        page: &PageQuery,
    ) -> Result<Paginated<ArticleSummary>, ClientError> {
        let req = ApiRequest::get(format!("{BLOG}/article/favorites/")).query(page)?;
        self.client.execute(req).await
    }

    pub async fn favorite(&self, article_id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{BLOG}/article/{article_id}/favorite/"
            )))
            .await
    }

    pub async fn unfavorite(&self, article_id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{BLOG}/article/{article_id}/unfavorite/"
            )))
            .await
    }

    /// Upload an image for use inside article content
    pub async fn upload_image(&self, image: FileUpload) -> Result<UploadedImage, ClientError> {
        let form = MultipartForm::new().file("image", image);
        let req = ApiRequest::post(format!("{BLOG}/upload-image/")).multipart(form);
        self.client.execute(req).await
    }
}
