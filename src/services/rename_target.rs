//! 重命名目标计算 - 业务能力层
//!
//! 只计算目标路径并查询是否已有文件占用，不创建、不删除、不加锁

use crate::models::RenameTarget;
use std::path::Path;
use tokio::fs;

/// 目标文件名：`{日期}-{姓名}_{原文件名}.{扩展名}`
pub fn target_file_name(
    base_name: &str,
    canonical_date: &str,
    name: &str,
    extension: &str,
) -> String {
    format!("{}-{}_{}.{}", canonical_date, name, base_name, extension)
}

/// 计算重命名目标
///
/// `safe` 仅反映查询这一刻目标路径上是否有文件；在重命名之前
/// 另一个并发任务仍可能占用同一路径
pub async fn resolve(
    base_name: &str,
    canonical_date: &str,
    name: &str,
    extension: &str,
    directory: &Path,
) -> RenameTarget {
    let file_name = target_file_name(base_name, canonical_date, name, extension);
    let new_path = directory.join(&file_name);
    // 查询失败视为已占用
    let exists = fs::try_exists(&new_path).await.unwrap_or(true);

    RenameTarget {
        new_path,
        file_name,
        safe: !exists,
    }
}
