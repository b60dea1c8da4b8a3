/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// CIR（Chemical Identifier Resolver）服务地址
    pub cir_base_url: String,
    /// PubChem PUG REST 服务地址
    pub pubchem_api_base_url: String,
    /// PubChem 化合物详情页地址
    pub pubchem_page_base_url: String,
    /// 等待 CAS 区域渲染的超时时间（秒）
    pub render_timeout_secs: u64,
    /// 渲染轮询间隔（毫秒）
    pub render_poll_interval_ms: u64,
    /// HTTP 请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 是否以有头模式启动浏览器（默认无头）
    pub browser_visible: bool,
    /// 浏览器可执行文件路径（不设置时由 chromiumoxide 自动探测）
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cir_base_url: "https://cactus.nci.nih.gov/chemical/structure".to_string(),
            pubchem_api_base_url: "https://pubchem.ncbi.nlm.nih.gov/rest/pug".to_string(),
            pubchem_page_base_url: "https://pubchem.ncbi.nlm.nih.gov/compound".to_string(),
            render_timeout_secs: 10,
            render_poll_interval_ms: 500,
            request_timeout_secs: 30,
            browser_visible: false,
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            cir_base_url: std::env::var("CIR_BASE_URL").unwrap_or(default.cir_base_url),
            pubchem_api_base_url: std::env::var("PUBCHEM_API_BASE_URL").unwrap_or(default.pubchem_api_base_url),
            pubchem_page_base_url: std::env::var("PUBCHEM_PAGE_BASE_URL").unwrap_or(default.pubchem_page_base_url),
            render_timeout_secs: std::env::var("RENDER_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.render_timeout_secs),
            render_poll_interval_ms: std::env::var("RENDER_POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.render_poll_interval_ms),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            browser_visible: std::env::var("BROWSER_VISIBLE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_visible),
            chrome_executable: std::env::var("CHROME_BIN").ok().or(default.chrome_executable),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render_timeout_is_ten_seconds() {
        let config = Config::default();
        assert_eq!(config.render_timeout_secs, 10);
        assert_eq!(config.render_poll_interval_ms, 500);
    }
}
