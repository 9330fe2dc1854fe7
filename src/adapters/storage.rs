use crate::domain::model::AuthSession;
use crate::domain::ports::Storage;
use crate::utils::error::{BookingError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        match fs::remove_file(full_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BookingError::IoError(e)),
        }
    }
}

/// 登入後的 token 以 JSON 保存
pub struct SessionStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub async fn load(&self) -> Result<Option<AuthSession>> {
        match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(BookingError::IoError(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 登入狀態；檔案損毀時視為未登入
    pub async fn current(&self) -> Result<Option<AuthSession>> {
        match self.load().await {
            Err(BookingError::SerializationError(e)) => {
                tracing::warn!(
                    "⚠️ Ignoring unreadable session file {}: {}",
                    self.file_name,
                    e
                );
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn save(&self, session: &AuthSession) -> Result<()> {
        let data = serde_json::to_vec_pretty(session)?;
        self.storage.write_file(&self.file_name, &data).await?;
        tracing::debug!("Session saved to {}", self.file_name);
        Ok(())
    }

    /// 登出
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove_file(&self.file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UserProfile;
    use tempfile::TempDir;

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user: UserProfile {
                id: 1,
                email: "host@example.com".to_string(),
                nickname: "host".to_string(),
                profile_image_url: None,
            },
        }
    }

    #[tokio::test]
    async fn test_session_round_trip_and_clear() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let store = SessionStore::new(storage, "session.json");

        assert_eq!(store.load().await.unwrap(), None);

        store.save(&session()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);

        // 已登出時再次登出不報錯
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_session_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        storage.write_file("session.json", b"not json").await.unwrap();

        let store = SessionStore::new(storage, "session.json");
        assert!(matches!(
            store.load().await,
            Err(BookingError::SerializationError(_))
        ));
        assert_eq!(store.current().await.unwrap(), None);
    }
}
