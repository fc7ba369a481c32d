use async_trait::async_trait;
use std::sync::Arc;

// Gatilho de chamada no discador externo. Fire-and-forget por contrato: quem
// chama loga a falha e segue; ela nunca vira erro de requisição.
#[async_trait]
pub trait DialerClient: Send + Sync {
    async fn trigger_call(&self, extension: &str, phone: &str) -> anyhow::Result<()>;
}

pub type SharedDialer = Arc<dyn DialerClient>;

pub struct HttpDialerClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDialerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl DialerClient for HttpDialerClient {
    // GET /make_call?ext=<ramal>&to=<telefone> no host configurado.
    async fn trigger_call(&self, extension: &str, phone: &str) -> anyhow::Result<()> {
        let url = format!("{}/make_call", self.base_url.trim_end_matches('/'));
        self.http
            .get(&url)
            .query(&[("ext", extension), ("to", phone)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
