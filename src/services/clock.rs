use chrono::{DateTime, Utc};
use std::sync::Arc;

// Abstração de relógio: nenhum serviço chama Utc::now() direto, o que mantém
// a lógica de turno testável com instantes fixos.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[cfg(test)]
pub mod test_support {
    use super::*;

    // Relógio congelado para os testes de serviço.
    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }
}
