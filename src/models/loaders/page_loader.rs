use crate::error::{AppError, AppResult};
use crate::models::page::PageFile;
use std::path::Path;
use tokio::fs;

/// 列出目录中所有指定扩展名的页面文件
///
/// 只在批次开始时扫描一次，按文件名排序，位置即为页面序号
pub async fn load_page_files(folder: &Path, extension: &str) -> AppResult<Vec<PageFile>> {
    if !fs::try_exists(folder).await.unwrap_or(false) {
        return Err(AppError::DirectoryNotFound(folder.to_path_buf()));
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::io(folder, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::io(folder, e))?
    {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        let matches_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if is_file && matches_extension {
            paths.push(path);
        }
    }

    paths.sort();

    let pages: Vec<PageFile> = paths
        .into_iter()
        .enumerate()
        .map(|(idx, path)| PageFile::new(path, idx + 1))
        .collect();

    tracing::debug!("在 {} 中找到 {} 个页面文件", folder.display(), pages.len());

    Ok(pages)
}
