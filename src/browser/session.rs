use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, BrowserError, Result};

/// 浏览器会话
///
/// 持有 Browser、后台事件处理任务和一个页面。
/// 会话必须在使用前创建、使用后通过 [`BrowserSession::close`] 关闭。
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// 启动浏览器会话
    ///
    /// 默认无头模式；启动失败是硬错误，直接向上抛。
    pub async fn launch(config: &Config) -> Result<Self> {
        info!("🚀 启动浏览器会话...");

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(vec![
                "--disable-gpu",           // 无头模式下禁用 GPU
                "--disable-dev-shm-usage", // 防止共享内存不足
            ]);

        if config.browser_visible {
            builder = builder.with_head();
        } else {
            builder = builder.new_headless_mode();
        }

        // 支持通过 CHROME_BIN 指定浏览器可执行文件
        if let Some(chrome_bin) = &config.chrome_executable {
            debug!("使用指定的浏览器可执行文件: {}", chrome_bin);
            builder = builder.chrome_executable(chrome_bin);
        }

        let browser_config = builder.build().map_err(|message| {
            error!("配置浏览器失败: {}", message);
            AppError::Browser(BrowserError::ConfigurationFailed { message })
        })?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            error!("启动浏览器失败: {}", e);
            AppError::browser_launch_failed(e)
        })?;
        debug!("浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        // 添加短暂延迟以等待浏览器状态同步
        sleep(Duration::from_millis(300)).await;

        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            AppError::Browser(BrowserError::PageCreationFailed {
                source: Box::new(e),
            })
        })?;

        info!("✓ 浏览器会话就绪");

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// 获取会话页面的引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 关闭浏览器并等待事件处理任务退出
    pub async fn close(mut self) -> Result<()> {
        debug!("正在关闭浏览器会话...");

        self.browser.close().await.map_err(|e| {
            AppError::Browser(BrowserError::CloseFailed {
                source: Box::new(e),
            })
        })?;

        if let Err(e) = self.handler_task.await {
            debug!("等待浏览器事件任务退出失败: {}", e);
        }

        info!("✓ 浏览器会话已关闭");
        Ok(())
    }
}

/// 会话句柄：区分借用的会话和内部创建的会话
///
/// 借用的会话归调用方所有，解析器只使用、不关闭；
/// 内部创建的会话在 [`SessionHandle::release`] 时被真正关闭。
/// 释放动作放在所有出口路径之后统一执行，包括检索失败和渲染超时。
pub enum SessionHandle<'a> {
    /// 调用方提供的会话
    Borrowed(&'a BrowserSession),
    /// 本次调用内部创建的会话
    Owned(BrowserSession),
}

impl SessionHandle<'_> {
    /// 获取会话页面的引用
    pub fn page(&self) -> &Page {
        match self {
            SessionHandle::Borrowed(session) => session.page(),
            SessionHandle::Owned(session) => session.page(),
        }
    }

    /// 释放会话
    ///
    /// 只有内部创建的会话会被关闭；借用的会话原样留给调用方。
    pub async fn release(self) -> Result<()> {
        match self {
            SessionHandle::Borrowed(_) => Ok(()),
            SessionHandle::Owned(session) => session.close().await,
        }
    }
}
