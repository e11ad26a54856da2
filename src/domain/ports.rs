use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn api_endpoint(&self) -> &str;
    fn model_name(&self) -> &str;
    fn temperature(&self) -> Option<f32>;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// 外部生成式模型：輸入 prompt，回傳未經整理的文字
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 送出請求前的前置檢查（例如 API key 是否存在）
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String>;
}
