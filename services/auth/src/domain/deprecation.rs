//! 非推奨シグナルのレスポンスヘッダー注入
//!
//! レガシー認証メソッドで認可されたリクエストに対し、移行期限と移行先
//! ドキュメントを示すヘッダーを付与する。純粋関数でI/Oを持たない。

use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue};
use tracing::warn;

use crate::domain::auth_result::AuthResult;

/// RFC 8594 Sunsetヘッダー（提供終了日時、http-date形式）
pub const SUNSET_HEADER: &str = "sunset";
/// 非推奨フラグヘッダー（リテラル文字列 "true"）
pub const DEPRECATION_HEADER: &str = "deprecation";
/// 移行ドキュメントへのLinkヘッダー（rel="deprecation"）
pub const LINK_HEADER: &str = "link";
/// 認可メソッドを通知するデバッグヘッダー
pub const AUTH_METHOD_HEADER: &str = "x-auth-method";

/// 非推奨ヘッダーを既存のヘッダー集合に追加する
///
/// - `auth_result`に非推奨マーカーがなければヘッダーをそのまま返す
/// - マーカーがあればSunset / Deprecation / Link / X-Auth-Methodの4つを
///   追加する。既存エントリは保持し、同一入力での再呼び出しは重複せず
///   同じヘッダー集合を返す（insertは上書き）
/// - `sunset`はISO-8601（例: `2025-06-15T14:30:00Z`）で、UTCのカレンダー
///   からhttp-date（`Sun, 15 Jun 2025 14:30:00 GMT`）に整形される
/// - `sunset`が解析できない場合はSunsetヘッダーのみ省略する
pub fn add_deprecation_headers(
    mut headers: HeaderMap,
    auth_result: &AuthResult,
    sunset: &str,
    docs_url: &str,
) -> HeaderMap {
    if !auth_result.deprecated() {
        return headers;
    }

    match format_http_date(sunset) {
        Some(http_date) => {
            if let Ok(value) = HeaderValue::from_str(&http_date) {
                headers.insert(SUNSET_HEADER, value);
            }
        }
        None => {
            warn!(sunset = %sunset, "Sunset日時を解析できないためSunsetヘッダーを省略");
        }
    }

    headers.insert(DEPRECATION_HEADER, HeaderValue::from_static("true"));

    match HeaderValue::from_str(&format!("<{docs_url}>; rel=\"deprecation\"")) {
        Ok(value) => {
            headers.insert(LINK_HEADER, value);
        }
        Err(_) => {
            warn!(docs_url = %docs_url, "移行ドキュメントURLが不正なためLinkヘッダーを省略");
        }
    }

    headers.insert(
        AUTH_METHOD_HEADER,
        HeaderValue::from_static(auth_result.method().as_str()),
    );

    headers
}

/// ISO-8601日時文字列をhttp-date（IMF-fixdate、GMT固定）に整形する
///
/// 曜日・月名はUTCカレンダーから計算され、ロケールに依存しない。
fn format_http_date(iso8601: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(iso8601.trim()).ok()?;
    Some(
        parsed
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
    )
}
