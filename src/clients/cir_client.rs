//! CIR API 客户端
//!
//! 负责与 Chemical Identifier Resolver 的交互：按名称查询 CAS 类型的标识符

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, Result};

/// CIR API 客户端
pub struct CirClient {
    http: Client,
    base_url: String,
}

impl CirClient {
    /// 创建新的 CIR 客户端
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.cir_base_url.clone(),
        }
    }

    /// 按名称查询 CAS 号
    ///
    /// # 参数
    /// - `name`: 物质名称
    ///
    /// # 返回
    /// 返回按服务给出顺序排列的 CAS 列表；名称未收录时返回空列表
    pub async fn resolve_cas(&self, name: &str) -> Result<Vec<String>> {
        let url = self.cas_url(name)?;
        debug!("CIR 查询: {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url.as_str(), e))?;

        // CIR 对未收录的名称返回 404
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: url.to_string(),
                status: response.status().as_u16(),
            }));
        }

        let body = response.text().await?;
        Ok(Self::parse_cas_body(&body))
    }

    /// 拆分 CIR 的纯文本响应（每行一个 CAS 号，保持顺序）
    fn parse_cas_body(body: &str) -> Vec<String> {
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 构造查询地址：{base}/{name}/cas，名称经过百分号编码
    fn cas_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|_| {
            AppError::Api(ApiError::InvalidUrl {
                url: self.base_url.clone(),
            })
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Api(ApiError::InvalidUrl {
                    url: self.base_url.clone(),
                })
            })?
            .push(name)
            .push("cas");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CirClient {
        CirClient::new(Client::new(), &Config::default())
    }

    #[test]
    fn test_parse_cas_body_multiple_lines() {
        let body = "50-78-2\n11126-35-5\n11126-37-7\n";
        assert_eq!(
            CirClient::parse_cas_body(body),
            vec!["50-78-2", "11126-35-5", "11126-37-7"]
        );
    }

    #[test]
    fn test_parse_cas_body_skips_blank_lines() {
        let body = "50-78-2\r\n\r\n";
        assert_eq!(CirClient::parse_cas_body(body), vec!["50-78-2"]);
    }

    #[test]
    fn test_parse_cas_body_empty() {
        assert!(CirClient::parse_cas_body("").is_empty());
    }

    #[test]
    fn test_cas_url_encodes_name() {
        let url = test_client().cas_url("acetic acid").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cactus.nci.nih.gov/chemical/structure/acetic%20acid/cas"
        );
    }
}
