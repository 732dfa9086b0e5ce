use serde::Deserialize;
use ts_rs::TS;

// 登录表单（application/x-www-form-urlencoded）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    /// 复选框，勾选时为 "on"
    pub remember: Option<String>,
    /// 登录成功后的跳转路径
    pub redirect_to: Option<String>,
}
