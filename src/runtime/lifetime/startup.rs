use crate::cache::{
    ObjectCache,
    register::{get_object_cache_plugin, register_builtin_plugins},
};
use crate::config::AppConfig;
use crate::errors::{Result, TutorError};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::normalize_email;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@tutor.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名称从注册表创建缓存后端
async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        TutorError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
pub async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    register_builtin_plugins();

    let cache_type = &AppConfig::get().cache.cache_type;
    info!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => Ok(cache),
        Err(e) if cache_type != "moka" => {
            warn!("{}, falling back to memory cache", e);
            build_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 用户表为空时创建默认管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(());
    }
    info!("No users found in database, creating default admin account...");

    let email = std::env::var("ADMIN_EMAIL")
        .map(|e| normalize_email(&e))
        .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

    // 优先使用环境变量中的密码，否则生成随机密码并只打印一次
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin_request = CreateUserRequest {
        email,
        name: "Administrator".to_string(),
        password: hash_password(&password)?,
        role: UserRole::Admin,
        class_ids: Vec::new(),
    };

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default admin account created successfully (ID: {}, email: {})",
        user.id, user.email
    );
    Ok(())
}

/// 准备服务器启动的上下文：存储、默认管理员和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，可以忽略
    let _ = rustls::crypto::ring::default_provider().install_default();

    let storage = crate::storage::create_storage().await?;
    info!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let cache = create_cache().await?;
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }
    info!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
