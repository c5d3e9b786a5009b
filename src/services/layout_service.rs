//! 排版服务 - 业务能力层
//!
//! 把抬头和变体列表排到固定尺寸的页面上，只产出定位好的文本行，
//! 不关心序列化格式。
//!
//! ## 分页规则
//!
//! - 游标 `y` 从 `height - margin` 开始，每放一行就向下移动
//! - 一道题（题干 + 全部选项 + 题后间距）作为整体放置：放下后游标若会低于
//!   `margin + 40`，先换页
//! - 变体标题与其第一道题一起放置，不会单独留在页尾
//! - 比整页还高的题目在行与行之间拆分，任何一行都不会低于 `margin`
//! - 变体之间的 40 单位间距不做溢出检查，最后一个变体之后不会产生空白页

use crate::error::RenderError;
use crate::infrastructure::font_metrics::FontMetrics;
use crate::models::question::{DocumentHeader, Question, Variant};
use crate::services::labels::LabelStyle;
use tracing::debug;

const HEADER_X: f32 = 400.0;
const HEADER_SIZE: f32 = 14.0;
const HEADER_LINE_STEP: f32 = 20.0;
const HEADER_BLOCK: f32 = 80.0;

const TITLE_SIZE: f32 = 18.0;
const TITLE_ADVANCE: f32 = 30.0;

const QUESTION_SIZE: f32 = 12.0;
const QUESTION_GAP: f32 = 10.0;
const OPTION_GAP: f32 = 5.0;
const OPTION_INDENT: f32 = 20.0;
const QUESTION_TRAILING_GAP: f32 = 10.0;

const VARIANT_GAP: f32 = 40.0;
const BREAK_RESERVE: f32 = 40.0;

/// 页面尺寸与页边距（与字号同一单位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            margin: 50.0,
        }
    }
}

impl PageGeometry {
    /// 每页第一行的位置
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    /// 低于该位置就需要换页
    pub fn break_threshold(&self) -> f32 {
        self.margin + BREAK_RESERVE
    }
}

/// 一条绘制指令：在 `(x, y)` 以 `size` 字号绘制 `text`（y 为基线）
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
}

/// 一页：固定尺寸 + 按绘制顺序排列的文本行
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<TextLine>,
}

impl Page {
    fn new(geometry: &PageGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            lines: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

/// 排版参数
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOptions {
    pub geometry: PageGeometry,
    pub label_style: LabelStyle,
}

/// 排版入口：抬头只出现在第一页，随后依次排每个变体
///
/// 任一行度量失败都会中止整个排版，不返回部分页面。
pub fn layout_document<M: FontMetrics>(
    header: &DocumentHeader,
    variants: &[Variant],
    options: &LayoutOptions,
    metrics: &M,
) -> Result<Vec<Page>, RenderError> {
    let mut layout = PageLayout::new(options.geometry, metrics);

    layout.place_header(header)?;
    for variant in variants {
        layout.place_variant(variant, options.label_style)?;
    }

    let pages = layout.finish();
    debug!("排版完成: {} 个变体, {} 页", variants.len(), pages.len());
    Ok(pages)
}

/// 排版状态：已完成的页面 + 当前页 + 游标
///
/// 创建即进入"当前页累积"状态，`finish` 消耗自身，之后不可再修改。
struct PageLayout<'m, M: FontMetrics> {
    geometry: PageGeometry,
    metrics: &'m M,
    finished: Vec<Page>,
    current: Page,
    y: f32,
    /// 当前页自换页以来还没有放置任何内容
    fresh: bool,
}

impl<'m, M: FontMetrics> PageLayout<'m, M> {
    fn new(geometry: PageGeometry, metrics: &'m M) -> Self {
        Self {
            geometry,
            metrics,
            finished: Vec::new(),
            current: Page::new(&geometry),
            y: geometry.top(),
            fresh: true,
        }
    }

    fn place_header(&mut self, header: &DocumentHeader) -> Result<(), RenderError> {
        let mut lines = vec![
            format!("Subject: {}", header.subject),
            format!("Grade: {}", header.grade),
            format!("Date: {}", header.date),
        ];
        if !header.author.trim().is_empty() {
            lines.push(format!("Author: {}", header.author));
        }

        let top = self.y;
        for (i, text) in lines.into_iter().enumerate() {
            let width = self.measure_width(&text, HEADER_SIZE)?;
            // 右侧放不下时向左移动，但不越过左边距
            let x = HEADER_X
                .min(self.geometry.width - self.geometry.margin - width)
                .max(self.geometry.margin);
            self.current.lines.push(TextLine {
                x,
                y: top - HEADER_LINE_STEP * i as f32,
                text,
                size: HEADER_SIZE,
            });
        }
        self.y = top - HEADER_BLOCK;
        self.fresh = false;
        Ok(())
    }

    fn place_variant(&mut self, variant: &Variant, style: LabelStyle) -> Result<(), RenderError> {
        let line_height = self.line_height()?;
        let first_block = variant
            .questions
            .first()
            .map(|q| question_block_height(q, line_height))
            .unwrap_or(0.0);

        self.ensure_room(TITLE_ADVANCE + first_block);
        let title = variant.title();
        self.place_line(self.geometry.margin, title, TITLE_SIZE, TITLE_ADVANCE)?;

        debug!(
            "排版 Variant {}: {} 道题 (第 {} 页)",
            variant.number,
            variant.questions.len(),
            self.finished.len() + 1
        );

        for (idx, question) in variant.questions.iter().enumerate() {
            // 第一道题的空间已随标题一起预留
            if idx > 0 {
                self.ensure_room(question_block_height(question, line_height));
            }
            self.place_question(idx + 1, question, line_height, style)?;
        }

        // 不做溢出检查
        self.y -= VARIANT_GAP;
        Ok(())
    }

    fn place_question(
        &mut self,
        number: usize,
        question: &Question,
        line_height: f32,
        style: LabelStyle,
    ) -> Result<(), RenderError> {
        debug!("  {}. {}", number, question);
        let left = self.geometry.margin;
        self.place_line(
            left,
            format!("{}. {}", number, question.text),
            QUESTION_SIZE,
            line_height + QUESTION_GAP,
        )?;

        for (opt_idx, option) in question.options.iter().enumerate() {
            let text = format!("{}. {}", style.label(opt_idx), option);
            self.place_line(
                left + OPTION_INDENT,
                text,
                QUESTION_SIZE,
                line_height + OPTION_GAP,
            )?;
        }

        self.y -= QUESTION_TRAILING_GAP;
        Ok(())
    }

    /// 放置一行；若该行会低于页边距则先换页
    fn place_line(
        &mut self,
        x: f32,
        text: String,
        size: f32,
        advance: f32,
    ) -> Result<(), RenderError> {
        self.check_measurable(&text, size)?;
        if !self.fresh && self.y < self.geometry.margin {
            self.break_page();
        }
        self.current.lines.push(TextLine {
            x,
            y: self.y,
            text,
            size,
        });
        self.y -= advance;
        self.fresh = false;
        Ok(())
    }

    /// 放下 `height` 后游标若低于阈值则换页；空白页上不换
    fn ensure_room(&mut self, height: f32) {
        if !self.fresh && self.y - height < self.geometry.break_threshold() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let page = std::mem::replace(&mut self.current, Page::new(&self.geometry));
        debug!(
            "换页: 第 {} 页完成 ({} 行), 游标 {:.1}",
            self.finished.len() + 1,
            page.lines.len(),
            self.y
        );
        self.finished.push(page);
        self.y = self.geometry.top();
        self.fresh = true;
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }

    fn line_height(&self) -> Result<f32, RenderError> {
        self.metrics
            .height_at_size(QUESTION_SIZE)
            .map_err(|source| RenderError::measurement("行高", source))
    }

    fn measure_width(&self, text: &str, size: f32) -> Result<f32, RenderError> {
        self.metrics
            .width_of_text_at_size(text, size)
            .map_err(|source| RenderError::measurement(text, source))
    }

    /// 正文行不换行，只需确认字体能度量（即能编码）该行
    fn check_measurable(&self, text: &str, size: f32) -> Result<(), RenderError> {
        self.measure_width(text, size).map(|_| ())
    }
}

/// 一道题占用的总高度（含题后间距）
fn question_block_height(question: &Question, line_height: f32) -> f32 {
    (line_height + QUESTION_GAP)
        + question.options.len() as f32 * (line_height + OPTION_GAP)
        + QUESTION_TRAILING_GAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use crate::infrastructure::font_metrics::Helvetica;

    /// 固定行高、每字符固定宽度的度量
    struct FixedMetrics {
        height: f32,
    }

    impl FontMetrics for FixedMetrics {
        fn height_at_size(&self, _size: f32) -> Result<f32, MetricsError> {
            Ok(self.height)
        }

        fn width_of_text_at_size(&self, text: &str, size: f32) -> Result<f32, MetricsError> {
            Ok(text.chars().count() as f32 * size * 0.5)
        }
    }

    struct BrokenMetrics;

    impl FontMetrics for BrokenMetrics {
        fn height_at_size(&self, size: f32) -> Result<f32, MetricsError> {
            Err(MetricsError::InvalidFontSize {
                size: size.to_string(),
            })
        }

        fn width_of_text_at_size(&self, _text: &str, _size: f32) -> Result<f32, MetricsError> {
            Ok(0.0)
        }
    }

    fn header() -> DocumentHeader {
        DocumentHeader {
            subject: "Math".to_string(),
            grade: "7".to_string(),
            date: "2024-05-01".to_string(),
            author: String::new(),
        }
    }

    fn variant(number: usize, questions: Vec<Question>) -> Variant {
        Variant { number, questions }
    }

    fn options() -> LayoutOptions {
        LayoutOptions::default()
    }

    #[test]
    fn test_empty_document_has_single_page() {
        let pages = layout_document(
            &header(),
            &[variant(1, Vec::new())],
            &options(),
            &Helvetica,
        )
        .unwrap();

        assert_eq!(pages.len(), 1);
        let texts: Vec<&str> = pages[0].texts().collect();
        assert_eq!(
            texts,
            vec!["Subject: Math", "Grade: 7", "Date: 2024-05-01", "Variant 1"]
        );
        assert_eq!(pages[0].width, 600.0);
        assert_eq!(pages[0].height, 800.0);
    }

    #[test]
    fn test_header_and_first_question_positions() {
        let metrics = FixedMetrics { height: 10.0 };
        let q = Question::with_options("Q", ["x", "y"]);
        let pages =
            layout_document(&header(), &[variant(1, vec![q])], &options(), &metrics).unwrap();
        let lines = &pages[0].lines;

        // 抬头：x = 400，间隔 20
        assert_eq!((lines[0].x, lines[0].y, lines[0].size), (400.0, 750.0, 14.0));
        assert_eq!(lines[1].y, 730.0);
        assert_eq!(lines[2].y, 710.0);

        // 标题在 750 - 80
        assert_eq!(lines[3].text, "Variant 1");
        assert_eq!((lines[3].x, lines[3].y, lines[3].size), (50.0, 670.0, 18.0));

        // 题干下移 30，选项缩进 20，行距 lh+10 / lh+5
        assert_eq!(lines[4].text, "1. Q");
        assert_eq!((lines[4].x, lines[4].y), (50.0, 640.0));
        assert_eq!(lines[5].text, "A. x");
        assert_eq!((lines[5].x, lines[5].y), (70.0, 620.0));
        assert_eq!(lines[6].text, "B. y");
        assert_eq!(lines[6].y, 605.0);
    }

    #[test]
    fn test_author_line_only_when_present() {
        let mut h = header();
        h.author = "Aziza".to_string();
        let pages = layout_document(&h, &[], &options(), &Helvetica).unwrap();
        let texts: Vec<&str> = pages[0].texts().collect();
        assert_eq!(texts[3], "Author: Aziza");
        assert_eq!(pages[0].lines[3].y, 690.0);
    }

    #[test]
    fn test_long_header_is_pulled_left() {
        let mut h = header();
        h.subject = "S".repeat(40);
        let metrics = FixedMetrics { height: 10.0 };
        let pages = layout_document(&h, &[], &options(), &metrics).unwrap();
        let line = &pages[0].lines[0];
        let width = line.text.chars().count() as f32 * 7.0;
        assert!(line.x < 400.0);
        assert!(line.x >= 50.0);
        assert!(line.x + width <= 550.0 || line.x == 50.0);
    }

    #[test]
    fn test_numbering_restarts_per_variant() {
        let v1 = variant(1, vec![Question::new("a"), Question::new("b")]);
        let v2 = variant(2, vec![Question::new("c")]);
        let pages = layout_document(&header(), &[v1, v2], &options(), &Helvetica).unwrap();
        let texts: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
        assert_eq!(
            &texts[3..],
            &["Variant 1", "1. a", "2. b", "Variant 2", "1. c"]
        );
    }

    #[test]
    fn test_wrapping_and_extended_labels() {
        let opts: Vec<String> = (0..27).map(|i| format!("o{}", i)).collect();
        let q = Question::with_options("many", opts);
        let v = [variant(1, vec![q])];

        let pages = layout_document(&header(), &v, &options(), &Helvetica).unwrap();
        let texts: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
        assert!(texts.contains(&"A. o26"));

        let extended = LayoutOptions {
            label_style: LabelStyle::Extended,
            ..LayoutOptions::default()
        };
        let pages = layout_document(&header(), &v, &extended, &Helvetica).unwrap();
        let texts: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
        assert!(texts.contains(&"AA. o26"));
    }

    #[test]
    fn test_block_that_does_not_fit_moves_to_next_page() {
        // 行高 10：每题 = 20 + 4*15 + 10 = 90
        let metrics = FixedMetrics { height: 10.0 };
        let questions: Vec<Question> = (0..8)
            .map(|i| Question::with_options(format!("q{}", i), ["a", "b", "c", "d"]))
            .collect();
        let pages = layout_document(
            &header(),
            &[variant(1, questions)],
            &options(),
            &metrics,
        )
        .unwrap();

        // 第一页: 标题后 y = 640，每题 90，阈值 90 → 640 - 90k >= 90 → 6 道
        assert_eq!(pages.len(), 2);
        let first = pages[0]
            .lines
            .iter()
            .filter(|l| l.x == 50.0 && l.text.contains(". q"))
            .count();
        assert_eq!(first, 6);
        assert_eq!(pages[1].lines[0].text, "7. q6");
        assert_eq!(pages[1].lines[0].y, 750.0);

        for page in &pages {
            assert!(page.lines.iter().all(|l| l.y >= 50.0));
        }
    }

    #[test]
    fn test_question_is_never_split_when_it_fits() {
        let metrics = FixedMetrics { height: 10.0 };
        let questions: Vec<Question> = (0..30)
            .map(|i| Question::with_options(format!("q{}", i), ["a", "b", "c"]))
            .collect();
        let pages = layout_document(
            &header(),
            &[variant(1, questions)],
            &options(),
            &metrics,
        )
        .unwrap();

        for page in &pages {
            // 每页第一行不是选项，最后一行是该题的最后一个选项
            assert!(!page.lines[0].text.starts_with("A. "));
            assert!(page.lines.last().unwrap().text.starts_with("C. "));
            assert!(page.lines.iter().all(|l| l.y >= 50.0));
        }
    }

    #[test]
    fn test_oversized_question_splits_between_lines() {
        let metrics = FixedMetrics { height: 10.0 };
        let opts: Vec<String> = (0..60).map(|i| format!("o{}", i)).collect();
        let q = Question::with_options("tall", opts);
        let pages =
            layout_document(&header(), &[variant(1, vec![q])], &options(), &metrics).unwrap();

        assert!(pages.len() >= 2);
        let total_options: usize = pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .filter(|l| l.x == 70.0)
            .count();
        assert_eq!(total_options, 60);
        for page in &pages {
            assert!(page.lines.iter().all(|l| l.y >= 50.0));
        }
    }

    #[test]
    fn test_title_is_kept_with_first_question() {
        let metrics = FixedMetrics { height: 10.0 };
        // 第一个变体 6 道 90 高的题，y 停在 100，再减 40 → 60
        let filler: Vec<Question> = (0..6)
            .map(|i| Question::with_options(format!("q{}", i), ["a", "b", "c", "d"]))
            .collect();
        let v2 = variant(2, vec![Question::with_options("next", ["a"])]);
        let pages =
            layout_document(&header(), &[variant(1, filler), v2], &options(), &metrics).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines[0].text, "Variant 2");
        assert_eq!(pages[1].lines[0].y, 750.0);
        assert_eq!(pages[1].lines[1].text, "1. next");
    }

    #[test]
    fn test_no_blank_trailing_page() {
        let metrics = FixedMetrics { height: 10.0 };
        let filler: Vec<Question> = (0..6)
            .map(|i| Question::with_options(format!("q{}", i), ["a", "b", "c", "d"]))
            .collect();
        let pages =
            layout_document(&header(), &[variant(1, filler)], &options(), &metrics).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages.iter().all(|p| !p.lines.is_empty()));
    }

    #[test]
    fn test_measurement_failure_aborts() {
        let err = layout_document(
            &header(),
            &[variant(1, vec![Question::new("q")])],
            &options(),
            &BrokenMetrics,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("文本度量失败"));

        let bad = variant(1, vec![Question::with_options("q", ["中文"])]);
        let err = layout_document(&header(), &[bad], &options(), &Helvetica).unwrap_err();
        let RenderError::Measurement { text, .. } = err;
        assert_eq!(text, "A. 中文");
    }
}
