//! PubChem API 客户端
//!
//! 负责与 PubChem PUG REST 的交互：按名称检索化合物，取最佳匹配的 CID

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, Result};

/// 名称检索响应
#[derive(Debug, Deserialize)]
struct CidResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: Option<IdentifierList>,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID")]
    cids: Vec<u64>,
}

/// PubChem API 客户端
pub struct PubChemClient {
    http: Client,
    base_url: String,
}

impl PubChemClient {
    /// 创建新的 PubChem 客户端
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.pubchem_api_base_url.clone(),
        }
    }

    /// 按名称检索最佳匹配的 CID
    ///
    /// # 参数
    /// - `name`: 物质名称
    ///
    /// # 返回
    /// 返回结果列表中的第一个 CID（最佳匹配）；名称未收录时返回 None
    pub async fn top_cid(&self, name: &str) -> Result<Option<u64>> {
        let url = self.cids_url(name)?;
        debug!("PubChem 名称检索: {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url.as_str(), e))?;

        // PubChem 对未收录的名称返回 404
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: url.to_string(),
                status: response.status().as_u16(),
            }));
        }

        let body = response.text().await?;
        Self::parse_top_cid(&body)
    }

    /// 从检索响应中取出第一个 CID
    fn parse_top_cid(body: &str) -> Result<Option<u64>> {
        let parsed: CidResponse = serde_json::from_str(body)?;
        Ok(parsed
            .identifier_list
            .and_then(|list| list.cids.into_iter().next()))
    }

    /// 构造检索地址：{base}/compound/name/{name}/cids/JSON
    fn cids_url(&self, name: &str) -> Result<Url> {
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
            .push("compound")
            .push("name")
            .push(name)
            .push("cids")
            .push("JSON");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PubChemClient {
        PubChemClient::new(Client::new(), &Config::default())
    }

    #[test]
    fn test_parse_top_cid_takes_first() {
        // aspirin 的检索响应节选
        let body = r#"{"IdentifierList":{"CID":[2244,2157]}}"#;
        assert_eq!(PubChemClient::parse_top_cid(body).unwrap(), Some(2244));
    }

    #[test]
    fn test_parse_top_cid_without_identifier_list() {
        let body = r#"{"Fault":{"Code":"PUGREST.NotFound"}}"#;
        assert_eq!(PubChemClient::parse_top_cid(body).unwrap(), None);
    }

    #[test]
    fn test_parse_top_cid_empty_cid_array() {
        let body = r#"{"IdentifierList":{"CID":[]}}"#;
        assert_eq!(PubChemClient::parse_top_cid(body).unwrap(), None);
    }

    #[test]
    fn test_parse_top_cid_invalid_json() {
        assert!(PubChemClient::parse_top_cid("not json").is_err());
    }

    #[test]
    fn test_cids_url_encodes_name() {
        let url = test_client().cids_url("acetic acid").unwrap();
        assert_eq!(
            url.as_str(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/acetic%20acid/cids/JSON"
        );
    }
}
