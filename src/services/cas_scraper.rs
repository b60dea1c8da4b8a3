//! CAS 抓取服务
//!
//! 负责从 PubChem 化合物详情页上抓取 CAS 号：
//! 加载页面 → 轮询等待 CAS 区域渲染 → 按文档顺序提取文本

use std::time::Duration;

use chromiumoxide::{Element, Page};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Lookup, NotFoundReason};

/// 化合物页面中 CAS 区域的结构化选择器
///
/// 这是对 PubChem 页面渲染结构的硬编码路径，属于对外部页面的兼容性依赖，
/// PubChem 改版时需要同步更新。
const CAS_SECTION_SELECTOR: &str = "#CAS div.section-content div.section-content-item p";

/// CAS 抓取服务
pub struct CasScraper {
    page_base_url: String,
    render_timeout: Duration,
    poll_interval: Duration,
}

impl CasScraper {
    /// 创建新的抓取服务
    pub fn new(config: &Config) -> Self {
        Self {
            page_base_url: config.pubchem_page_base_url.clone(),
            render_timeout: Duration::from_secs(config.render_timeout_secs),
            poll_interval: Duration::from_millis(config.render_poll_interval_ms),
        }
    }

    /// 构造化合物详情页地址
    pub fn compound_url(&self, cid: u64) -> String {
        format!("{}/{}#section=CAS", self.page_base_url, cid)
    }

    /// 抓取化合物页面上的 CAS 号
    ///
    /// # 参数
    /// - `page`: 浏览器页面对象
    /// - `cid`: 化合物的 PubChem ID
    ///
    /// # 返回
    /// 返回按文档顺序排列的 CAS 列表；导航失败和渲染超时都转成 `NotFound`，不向上抛
    pub async fn scrape(&self, page: &Page, cid: u64) -> Result<Lookup> {
        let url = self.compound_url(cid);
        info!("📄 加载化合物页面: {}", url);

        if let Err(e) = page.goto(url.as_str()).await {
            warn!("⚠️ 导航到 {} 失败: {}", url, e);
            return Ok(Lookup::NotFound(NotFoundReason::ServiceError));
        }

        // 轮询等待 CAS 区域渲染完成
        let elements = match self.wait_for_cas_section(page).await {
            Some(elements) => elements,
            None => {
                warn!(
                    "⚠️ 加载 {} 秒后页面仍未出现 CAS 区域",
                    self.render_timeout.as_secs()
                );
                return Ok(Lookup::NotFound(NotFoundReason::RenderTimeout));
            }
        };

        // 按文档顺序提取每个元素的可见文本
        let mut cas_list = Vec::with_capacity(elements.len());
        for element in &elements {
            match element.inner_text().await {
                Ok(Some(text)) => cas_list.push(text),
                Ok(None) => debug!("CAS 元素没有可见文本，跳过"),
                Err(e) => debug!("读取 CAS 元素文本失败，跳过: {}", e),
            }
        }

        info!("✓ 从页面提取到 {} 个 CAS 号", cas_list.len());
        Ok(Lookup::Found(cas_list))
    }

    /// 等待 CAS 区域出现
    ///
    /// 在超时时间内每隔一个轮询间隔查询一次选择器，超时返回 None
    async fn wait_for_cas_section(&self, page: &Page) -> Option<Vec<Element>> {
        let deadline = Instant::now() + self.render_timeout;

        loop {
            if let Ok(elements) = page.find_elements(CAS_SECTION_SELECTOR).await {
                if !elements.is_empty() {
                    return Some(elements);
                }
            }

            if Instant::now() >= deadline {
                return None;
            }

            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_url() {
        let scraper = CasScraper::new(&Config::default());
        assert_eq!(
            scraper.compound_url(2244),
            "https://pubchem.ncbi.nlm.nih.gov/compound/2244#section=CAS"
        );
    }

    #[test]
    fn test_timeouts_come_from_config() {
        let mut config = Config::default();
        config.render_timeout_secs = 3;
        config.render_poll_interval_ms = 100;

        let scraper = CasScraper::new(&config);
        assert_eq!(scraper.render_timeout, Duration::from_secs(3));
        assert_eq!(scraper.poll_interval, Duration::from_millis(100));
    }
}
