//! 名称解析流程 - 流程层
//!
//! 核心职责：定义"一个物质名称"的完整解析流程
//!
//! 流程顺序：
//! 1. `cir`: 直接查询 CIR → CAS 列表
//! 2. `pubchem`: 会话获取 → CID 检索 → 页面加载 → 等待渲染 → 抓取 → 会话释放

use std::time::Duration;

use chromiumoxide::Page;
use reqwest::Client;
use tracing::{info, warn};

use crate::browser::{BrowserSession, SessionHandle};
use crate::clients::{CirClient, PubChemClient};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Lookup, Method, NotFoundReason, ResolveOutcome};
use crate::services::CasScraper;

/// 名称解析器
///
/// - 编排完整的解析流程
/// - 决定何时查询、何时抓取、何时释放会话
/// - 远程故障统一转成"未找到"，只有浏览器启动失败会向上抛
pub struct NameResolver {
    config: Config,
    cir_client: CirClient,
    pubchem_client: PubChemClient,
    cas_scraper: CasScraper,
}

impl NameResolver {
    /// 创建新的名称解析器
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("构建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            cir_client: CirClient::new(http.clone(), &config),
            pubchem_client: PubChemClient::new(http, &config),
            cas_scraper: CasScraper::new(&config),
            config,
        })
    }

    /// 解析物质名称
    ///
    /// # 参数
    /// - `name`: 物质名称（不做校验，查不到就按"未找到"返回）
    /// - `method`: 解析方法
    /// - `session`: 可选的浏览器会话，只对 `pubchem` 方法有意义；
    ///   提供时归调用方所有，解析器不会关闭它
    /// - `first_only`: 是否只返回第一个 CAS 号
    ///
    /// # 返回
    /// 返回单个 CAS 号、完整列表或"未找到"；列表为空时取第一个会转成"未找到"
    pub async fn resolve(
        &self,
        name: &str,
        method: Method,
        session: Option<&BrowserSession>,
        first_only: bool,
    ) -> Result<ResolveOutcome> {
        info!("🔍 正在使用 {} 解析物质名称: {}", method, name);

        let lookup = match method {
            Method::Cir => self.resolve_cir(name).await?,
            Method::PubChem => self.resolve_pubchem(name, session).await?,
        };

        Ok(Self::shape_outcome(lookup, first_only))
    }

    /// 按 first_only 标志整形返回值
    ///
    /// 空列表 + first_only 时转成"未找到"，而不是越界访问
    fn shape_outcome(lookup: Lookup, first_only: bool) -> ResolveOutcome {
        match lookup {
            Lookup::NotFound(reason) => {
                info!("未找到 CAS: {}", reason);
                ResolveOutcome::NotFound(reason)
            }
            Lookup::Found(cas_list) => {
                if first_only {
                    match cas_list.into_iter().next() {
                        Some(cas) => ResolveOutcome::First(cas),
                        None => {
                            warn!("⚠️ 结果列表为空，无法取第一个 CAS");
                            ResolveOutcome::NotFound(NotFoundReason::EmptyResult)
                        }
                    }
                } else {
                    ResolveOutcome::All(cas_list)
                }
            }
        }
    }

    // ========== 方法 1: CIR 快速查询 ==========

    /// CIR 速度快但经常查不到，不是推荐的默认方法
    async fn resolve_cir(&self, name: &str) -> Result<Lookup> {
        match self.cir_client.resolve_cas(name).await {
            Ok(cas_list) if cas_list.is_empty() => {
                info!("CIR 中未找到该物质");
                Ok(Lookup::NotFound(NotFoundReason::NoMatch))
            }
            Ok(cas_list) => {
                info!("✓ CIR 返回 {} 个 CAS 号", cas_list.len());
                Ok(Lookup::Found(cas_list))
            }
            // 远程故障一律按"未找到"处理，不重试
            Err(e) => {
                warn!("⚠️ CIR 查询失败: {}", e);
                Ok(Lookup::NotFound(NotFoundReason::ServiceError))
            }
        }
    }

    // ========== 方法 2: PubChem 浏览器抓取 ==========

    /// 会话获取 → 查询 → 会话释放
    ///
    /// 调用方没有提供会话时内部启动一个，启动失败直接向上抛；
    /// 内部创建的会话无论查询成功还是失败都会被关闭。
    async fn resolve_pubchem(
        &self,
        name: &str,
        session: Option<&BrowserSession>,
    ) -> Result<Lookup> {
        let handle = match session {
            Some(shared) => SessionHandle::Borrowed(shared),
            None => SessionHandle::Owned(BrowserSession::launch(&self.config).await?),
        };

        let lookup = self.pubchem_lookup(name, handle.page()).await;

        // 释放失败不覆盖查询结果，只记录
        if let Err(e) = handle.release().await {
            warn!("⚠️ 释放浏览器会话失败: {}", e);
        }

        lookup
    }

    /// CID 检索 → 页面抓取
    async fn pubchem_lookup(&self, name: &str, page: &Page) -> Result<Lookup> {
        // 先检索最佳匹配的 CID，检索不到就不再动浏览器
        let cid = match self.pubchem_client.top_cid(name).await {
            Ok(Some(cid)) => cid,
            Ok(None) => {
                info!("PubChem 中未找到该物质");
                return Ok(Lookup::NotFound(NotFoundReason::NoMatch));
            }
            Err(e) => {
                warn!("⚠️ PubChem 检索失败: {}", e);
                return Ok(Lookup::NotFound(NotFoundReason::ServiceError));
            }
        };

        if self.config.verbose_logging {
            info!("最佳匹配的 CID: {}", cid);
        }

        self.cas_scraper.scrape(page, cid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_outcome_first_only() {
        let lookup = Lookup::Found(vec!["50-78-2".to_string(), "11126-35-5".to_string()]);
        assert_eq!(
            NameResolver::shape_outcome(lookup, true),
            ResolveOutcome::First("50-78-2".to_string())
        );
    }

    #[test]
    fn test_shape_outcome_full_list() {
        let lookup = Lookup::Found(vec!["50-78-2".to_string(), "11126-35-5".to_string()]);
        assert_eq!(
            NameResolver::shape_outcome(lookup, false),
            ResolveOutcome::All(vec!["50-78-2".to_string(), "11126-35-5".to_string()])
        );
    }

    #[test]
    fn test_shape_outcome_empty_list_first_only() {
        // 空列表取第一个必须转成"未找到"，不能越界
        let lookup = Lookup::Found(Vec::new());
        assert_eq!(
            NameResolver::shape_outcome(lookup, true),
            ResolveOutcome::NotFound(NotFoundReason::EmptyResult)
        );
    }

    #[test]
    fn test_shape_outcome_empty_list_full() {
        // 不取第一个时空列表原样返回
        let lookup = Lookup::Found(Vec::new());
        assert_eq!(
            NameResolver::shape_outcome(lookup, false),
            ResolveOutcome::All(Vec::new())
        );
    }

    #[test]
    fn test_shape_outcome_not_found_passthrough() {
        let lookup = Lookup::NotFound(NotFoundReason::RenderTimeout);
        assert_eq!(
            NameResolver::shape_outcome(lookup, true),
            ResolveOutcome::NotFound(NotFoundReason::RenderTimeout)
        );
    }

    /// 服务不可达时按"未找到"返回，而不是向调用方抛错
    #[test]
    fn test_cir_unreachable_maps_to_service_error() {
        let mut config = Config::default();
        config.cir_base_url = "http://127.0.0.1:9".to_string();
        config.request_timeout_secs = 2;

        let resolver = NameResolver::new(config).expect("创建解析器失败");
        let outcome = tokio_test::block_on(resolver.resolve("aspirin", Method::Cir, None, true))
            .expect("解析不应返回硬错误");

        assert_eq!(
            outcome,
            ResolveOutcome::NotFound(NotFoundReason::ServiceError)
        );
    }
}
