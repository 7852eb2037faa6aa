use page_renamer::infrastructure::{NoopReporter, PlainTextExtractor};
use page_renamer::orchestrator::batch_processor::base_name_of;
use page_renamer::{
    App, AppError, AppResult, CancelToken, Config, ExtractError, Reporter, Splitter,
    TextExtractor,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

// ========== 测试用协作者 ==========

/// 记录同时进行中的提取数量
#[derive(Default)]
struct ConcurrencyTracker {
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl TextExtractor for ConcurrencyTracker {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(30));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(std::fs::read_to_string(path)?)
    }
}

/// 第一次被调用时触发取消
struct CancellingExtractor {
    token: CancelToken,
    calls: AtomicUsize,
}

impl TextExtractor for CancellingExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token.cancel();
        Ok(std::fs::read_to_string(path)?)
    }
}

/// 把预先准备的文本写成页面文件
struct TextSplitter {
    pages: Vec<&'static str>,
}

impl Splitter for TextSplitter {
    fn split(&self, input: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
        let base = base_name_of(input)?;
        let mut outputs = Vec::new();
        for (idx, text) in self.pages.iter().enumerate() {
            let path = output_dir.join(format!("{}_{:03}.pdf", base, idx + 1));
            std::fs::write(&path, text).map_err(|e| AppError::io(&path, e))?;
            outputs.push(path);
        }
        Ok(outputs)
    }

    fn output_extension(&self) -> &str {
        "pdf"
    }
}

struct FailingSplitter;

impl Splitter for FailingSplitter {
    fn split(&self, input: &Path, _output_dir: &Path) -> AppResult<Vec<PathBuf>> {
        Err(AppError::split(input, "损坏的文档"))
    }

    fn output_extension(&self) -> &str {
        "pdf"
    }
}

#[derive(Default)]
struct RecordingReporter {
    progress: Mutex<Vec<f64>>,
    statuses: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Reporter for RecordingReporter {
    fn report_progress(&self, fraction: f64) {
        self.progress.lock().unwrap().push(fraction);
    }

    fn report_status(&self, text: &str) {
        self.statuses.lock().unwrap().push(text.to_string());
    }

    fn report_errors(&self, text: &str) {
        self.errors.lock().unwrap().push(text.to_string());
    }
}

// ========== 辅助函数 ==========

fn config(max_concurrent_pages: usize) -> Config {
    Config {
        max_concurrent_pages,
        ..Default::default()
    }
}

fn write_page(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn quiet_app(max_concurrent_pages: usize) -> App {
    App::initialize(config(max_concurrent_pages))
        .unwrap()
        .with_extractor(Arc::new(PlainTextExtractor))
        .with_reporter(Arc::new(NoopReporter))
}

// ========== 测试 ==========

#[tokio::test]
async fn test_end_to_end_example() {
    let dir = TempDir::new().unwrap();
    let original = write_page(dir.path(), "doc.pdf", "原始文档 2024年1月1日 李四先生");
    write_page(dir.path(), "doc_001.pdf", "...2024年5月1日...王小姐...");
    let second = write_page(dir.path(), "doc_002.pdf", "这一页没有日期 张三先生");

    let report = assert_ok!(quiet_app(5).process_directory(dir.path(), "doc").await);

    assert_eq!(report.total, 3);
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, vec!["doc_002.pdf：未提取到日期".to_string()]);
    assert!(!report.cancelled);

    assert!(dir.path().join("2024-5-1-王_doc.pdf").exists());
    assert!(!dir.path().join("doc_001.pdf").exists());
    assert!(original.exists(), "原始文件不应被重命名");
    assert!(second.exists(), "失败的页面保持原名");

    let report_file = std::fs::read_to_string(dir.path().join("rename_report.txt")).unwrap();
    assert!(report_file.contains("doc_002.pdf：未提取到日期"));
}

#[tokio::test]
async fn test_processed_count_excludes_original() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "scan.pdf", "2024-1-1 王五先生");
    let texts = [
        "2024-1-1 王五先生",
        "2024/2/2 赵六小姐",
        "2024年3月3日 孙七先生",
        "2024-4-4 周八小姐",
    ];
    for (i, text) in texts.iter().enumerate() {
        write_page(dir.path(), &format!("scan_{:03}.pdf", i + 1), text);
    }

    let report = assert_ok!(quiet_app(2).process_directory(dir.path(), "scan").await);

    assert_eq!(report.total, 5);
    assert_eq!(report.processed, 4);
    assert!(report.errors.is_empty());
    for name in [
        "2024-1-1-王五_scan.pdf",
        "2024-2-2-赵六_scan.pdf",
        "2024-3-3-孙七_scan.pdf",
        "2024-4-4-周八_scan.pdf",
    ] {
        assert!(dir.path().join(name).exists(), "缺少 {}", name);
    }
}

#[tokio::test]
async fn test_duplicate_targets_yield_one_rename_and_one_collision() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "doc_001.pdf", "2024-6-1 陈九先生");
    write_page(dir.path(), "doc_002.pdf", "2024/6/1 陈九先生");

    // 并发数为 1 时两页依次处理，第二页必然发现目标已存在
    let report = assert_ok!(quiet_app(1).process_directory(dir.path(), "doc").await);

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("doc_002.pdf：目标文件已存在"));
    assert!(dir.path().join("2024-6-1-陈九_doc.pdf").exists());
    assert!(dir.path().join("doc_002.pdf").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_admission_gate_bounds_concurrency() {
    let dir = TempDir::new().unwrap();
    for i in 1..=10 {
        write_page(
            dir.path(),
            &format!("doc_{:03}.pdf", i),
            &format!("2024-1-{} 测试先生", i),
        );
    }

    let tracker = Arc::new(ConcurrencyTracker::default());
    let app = App::initialize(config(3))
        .unwrap()
        .with_extractor(tracker.clone())
        .with_reporter(Arc::new(NoopReporter));

    let report = assert_ok!(app.process_directory(dir.path(), "doc").await);

    assert_eq!(report.processed, 10);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 10);
    let peak = tracker.peak.load(Ordering::SeqCst);
    assert!(peak >= 1 && peak <= 3, "同时进行的页面数 {} 超过闸门", peak);
}

#[tokio::test]
async fn test_cancellation_stops_admission() {
    let dir = TempDir::new().unwrap();
    for i in 1..=5 {
        write_page(
            dir.path(),
            &format!("doc_{:03}.pdf", i),
            &format!("2024-2-{} 测试小姐", i),
        );
    }

    let app = App::initialize(config(1)).unwrap();
    let extractor = Arc::new(CancellingExtractor {
        token: app.cancel_token(),
        calls: AtomicUsize::new(0),
    });
    let app = app
        .with_extractor(extractor.clone())
        .with_reporter(Arc::new(NoopReporter));

    let report = assert_ok!(app.process_directory(dir.path(), "doc").await);

    // 只有第一页被准入，且它完整地跑完了
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    assert!(report.cancelled);
    assert_eq!(report.total, 5);
    assert_eq!(report.processed, 1);
    assert!(dir.path().join("2024-2-1-测试_doc.pdf").exists());
    for i in 2..=5 {
        assert!(dir.path().join(format!("doc_{:03}.pdf", i)).exists());
    }
}

#[tokio::test]
async fn test_progress_and_errors_reach_reporter() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "doc_001.pdf", "2024-1-1 甲乙先生");
    write_page(dir.path(), "doc_002.pdf", "2024-1-2 丙丁小姐");
    write_page(dir.path(), "doc_003.pdf", "2024-1-3 没有称谓");
    write_page(dir.path(), "doc_004.pdf", "2024-1-4 戊己先生");

    let reporter = Arc::new(RecordingReporter::default());
    let app = App::initialize(config(2))
        .unwrap()
        .with_extractor(Arc::new(PlainTextExtractor))
        .with_reporter(reporter.clone());

    let report = assert_ok!(app.process_directory(dir.path(), "doc").await);
    assert_eq!(report.processed, 3);

    // 并发完成时上报顺序也保持递增
    let progress = reporter.progress.lock().unwrap().clone();
    assert_eq!(progress, vec![0.25, 0.5, 0.75]);

    let statuses = reporter.statuses.lock().unwrap();
    assert_eq!(statuses.last().unwrap(), "处理完成: 成功 3/4，失败 1");
    let errors = reporter.errors.lock().unwrap();
    assert_eq!(errors.as_slice(), ["doc_003.pdf：未提取到姓名"]);
}

#[tokio::test]
async fn test_run_splits_then_renames() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "预约单.pdf", "multi-page");

    let app = App::initialize(config(5))
        .unwrap()
        .with_splitter(Arc::new(TextSplitter {
            pages: vec!["2024年7月8日 刘备先生", "2024年7月9日 貂蝉小姐", "空白页"],
        }))
        .with_extractor(Arc::new(PlainTextExtractor))
        .with_reporter(Arc::new(NoopReporter));

    let report = assert_ok!(app.run(&input).await);

    let pages_dir = dir.path().join("预约单");
    assert_eq!(report.total, 3);
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors, vec!["预约单_003.pdf：未提取到日期".to_string()]);
    assert!(pages_dir.join("2024-7-8-刘备_预约单.pdf").exists());
    assert!(pages_dir.join("2024-7-9-貂蝉_预约单.pdf").exists());
    assert!(input.exists());
}

#[tokio::test]
async fn test_run_scans_with_splitter_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "doc.pdf", "multi-page");

    let config = Config {
        page_extension: "docx".to_string(),
        ..Default::default()
    };
    let app = App::initialize(config)
        .unwrap()
        .with_splitter(Arc::new(TextSplitter {
            pages: vec!["2024年5月1日 王小姐"],
        }))
        .with_extractor(Arc::new(PlainTextExtractor))
        .with_reporter(Arc::new(NoopReporter));

    let report = assert_ok!(app.run(&input).await);

    assert_eq!(report.total, 1);
    assert_eq!(report.processed, 1);
    assert!(report.errors.is_empty());
    assert!(dir.path().join("doc").join("2024-5-1-王_doc.pdf").exists());
}

#[tokio::test]
async fn test_splitter_failure_aborts_batch() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "doc.pdf", "broken");

    let app = App::initialize(config(5))
        .unwrap()
        .with_splitter(Arc::new(FailingSplitter))
        .with_reporter(Arc::new(NoopReporter));

    let err = assert_err!(app.run(&input).await);
    assert!(matches!(err, AppError::Split { .. }));
    assert!(!dir.path().join("doc").join("rename_report.txt").exists());
}

#[tokio::test]
async fn test_missing_input_is_batch_error() {
    let dir = TempDir::new().unwrap();
    let app = quiet_app(5);

    let err = assert_err!(app.run(&dir.path().join("nope.pdf")).await);
    assert!(matches!(err, AppError::InputNotFound(_)));
}

#[tokio::test]
async fn test_empty_directory_reports_nothing() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "notes.txt", "2024-1-1 王先生");

    let report = assert_ok!(quiet_app(5).process_directory(dir.path(), "doc").await);
    assert_eq!(report.total, 0);
    assert_eq!(report.processed, 0);
    assert!(dir.path().join("notes.txt").exists());
}
