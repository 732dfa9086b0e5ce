use super::entities::UserRole;

// 创建用户（仅供启动时初始化管理员使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}
