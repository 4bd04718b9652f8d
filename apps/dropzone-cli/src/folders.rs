//! Folder list as seen by one command.

use dropzone_client::{BackendClient, ClientError};
use dropzone_protocol::Folder;

/// Read-through view of the backend folder list.
#[derive(Debug, Default)]
pub struct FolderView {
    folders: Vec<Folder>,
}

impl FolderView {
    /// Fetches a fresh list from the backend.
    pub async fn load(client: &BackendClient) -> Result<Self, ClientError> {
        let mut view = Self::default();
        view.refresh(client).await?;
        Ok(view)
    }

    /// Replaces the cached list. On error the previous list is kept.
    pub async fn refresh(&mut self, client: &BackendClient) -> Result<(), ClientError> {
        self.folders = client.list_folders().await?;
        tracing::debug!(count = self.folders.len(), "folders loaded");
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Printable listing, one folder per line.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "No folders yet.".into();
        }
        let mut out = format!("{} folder(s):\n", self.len());
        for folder in &self.folders {
            out.push_str(&format!("  {:<24} {}\n", folder.name, folder.path));
        }
        out
    }
}

impl From<Vec<Folder>> for FolderView {
    fn from(folders: Vec<Folder>) -> Self {
        Self { folders }
    }
}
