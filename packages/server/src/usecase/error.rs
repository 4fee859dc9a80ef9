//! UseCase 層のエラー型

use tegaki_shared::protocol::ProtocolError;
use thiserror::Error;

/// 受信フレームの中継に失敗した理由
///
/// いずれもフレーム単位のエラーであり、接続は維持される。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("Rejected frame: {0}")]
    Rejected(#[from] ProtocolError),
}
