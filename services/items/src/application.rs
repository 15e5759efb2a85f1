// アプリケーション層モジュール
pub mod api_error;
pub mod change_feed_handler;
pub mod create_one_handler;
pub mod delete_one_handler;
pub mod get_all_handler;
pub mod get_one_handler;
pub mod http_response;
pub mod preflight_handler;
pub mod request;
pub mod update_one_handler;


// 再エクスポート
pub use api_error::{ApiError, ApiErrorBody};
pub use change_feed_handler::{ChangeFeedHandler, ChangeFeedResult};
pub use create_one_handler::CreateOneHandler;
pub use delete_one_handler::DeleteOneHandler;
pub use get_all_handler::GetAllHandler;
pub use get_one_handler::GetOneHandler;
pub use preflight_handler::PreflightHandler;
pub use request::RequestError;
pub use update_one_handler::UpdateOneHandler;
