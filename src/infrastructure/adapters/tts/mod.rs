//! TTS Adapter - Edge TTS 客户端与测试用 Fake 客户端

mod edge_tts_client;
mod fake_tts_client;

pub use edge_tts_client::*;
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
