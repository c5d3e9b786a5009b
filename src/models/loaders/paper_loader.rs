use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuestionPaper;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持的试卷文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    Toml,
    Json,
}

impl PaperFormat {
    /// 根据扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(PaperFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(PaperFormat::Json),
            _ => None,
        }
    }

    /// 解析文件内容
    pub fn parse(self, content: &str, path: &Path) -> AppResult<QuestionPaper> {
        let display = path.display().to_string();
        match self {
            PaperFormat::Toml => {
                toml::from_str(content).map_err(|e| AppError::parse_failed(display, e))
            }
            PaperFormat::Json => {
                serde_json::from_str(content).map_err(|e| AppError::parse_failed(display, e))
            }
        }
    }
}

/// 从 TOML / JSON 文件加载一份试卷
pub async fn load_paper(file_path: &Path) -> AppResult<QuestionPaper> {
    let format = PaperFormat::from_path(file_path).ok_or_else(|| FileError::UnsupportedFormat {
        path: file_path.display().to_string(),
    })?;

    if !file_path.exists() {
        return Err(FileError::NotFound {
            path: file_path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(file_path)
        .await
        .map_err(|e| AppError::file_read_failed(file_path.display().to_string(), e))?;

    let paper = format.parse(&content, file_path)?;

    Ok(paper.with_file_path(file_path.to_string_lossy().to_string()))
}

/// 加载文件夹中所有试卷文件，按文件名排序
///
/// 单个文件解析失败只记录警告，不影响其它文件。
pub async fn load_all_papers(folder_path: &str) -> AppResult<Vec<QuestionPaper>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paper_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if PaperFormat::from_path(&path).is_some() {
            paper_files.push(path);
        }
    }
    paper_files.sort();

    let mut papers = Vec::new();
    for path in paper_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_paper(&path).await {
            Ok(paper) => {
                tracing::info!(
                    "成功加载 {} 个题目, {} 个选项",
                    paper.questions.len(),
                    paper.option_count()
                );
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(papers)
}
