use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::models::message::{ ChatMessage, ContentPart, ImageUrl };

/// Paragraph text beyond this many characters is dropped from combined prompts
pub const CONTEXT_PARAGRAPH_LIMIT: usize = 300;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

const TEXT_SYSTEM_PROMPT: &str =
    r#"Ты — аналитик региональных СМИ.

Тебе передан текст с главной страницы новостного портала конкурента: заголовок страницы, H1 и первый абзац.

Верни строго JSON без пояснений:

{
  "strengths": ["Сильная сторона 1", "Сильная сторона 2"],
  "weaknesses": ["Слабая сторона 1", "Слабая сторона 2"],
  "unique_offers": ["Особенность портала 1"],
  "recommendations": ["Рекомендация 1", "Рекомендация 2"],
  "summary": "Общий вывод о редакционной политике и повестке"
}

Пиши на русском языке.
"#;

const IMAGE_SYSTEM_PROMPT: &str =
    r#"Ты — медиа-аналитик, специализирующийся на региональных новостных СМИ.

Тебе предоставлен скриншот главной страницы новостного портала.

Верни строго JSON без пояснений:

{
  "description": "Краткое описание портала и его визуальной структуры",
  "marketing_insights": ["Ключевые темы повестки", "Редакционные акценты", "Эмоциональный фон"],
  "visual_style_score": 7,
  "visual_style_analysis": "Описание визуального стиля и подачи",
  "recommendations": ["Рекомендация 1", "Рекомендация 2"]
}

Поле visual_style_score — целое число от 1 до 10.
Пиши на русском языке.
"#;

const COMBINED_SYSTEM_PROMPT: &str =
    r#"Ты — аналитик региональных СМИ.

На основе URL, заголовка, H1, текста и скриншота главной страницы портала проведи конкурентный анализ.

Верни строго JSON без пояснений:

{
  "strengths": ["Сильная сторона портала"],
  "weaknesses": ["Слабая сторона портала"],
  "unique_offers": ["Отличительная особенность или формат подачи"],
  "recommendations": ["Рекомендация по улучшению"],
  "summary": "Общий вывод о редакционной политике и месте портала в региональной повестке"
}

Пиши на русском языке.
Опирайся и на визуальный, и на текстовый контекст.
"#;

const IMAGE_INSTRUCTION: &str =
    "Проанализируй этот скриншот главной страницы регионального новостного портала:";

/// Which kind of analysis a prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Text,
    Image,
    Combined,
}

impl PromptMode {
    /// Whether the prompt carries an image and must go to the vision model
    pub fn needs_vision(&self) -> bool {
        !matches!(self, PromptMode::Text)
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptMode::Text => TEXT_SYSTEM_PROMPT,
            PromptMode::Image => IMAGE_SYSTEM_PROMPT,
            PromptMode::Combined => COMBINED_SYSTEM_PROMPT,
        }
    }
}

impl std::fmt::Display for PromptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptMode::Text => write!(f, "text"),
            PromptMode::Image => write!(f, "image"),
            PromptMode::Combined => write!(f, "combined"),
        }
    }
}

/// A system + user message pair ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub mode: PromptMode,
    pub messages: Vec<ChatMessage>,
}

/// Page fields used as context for a combined prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContext<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub h1: Option<&'a str>,
    pub first_paragraph: Option<&'a str>,
}

/// Join the present, non-blank page fields into labeled lines.
/// Returns `None` when there is nothing to analyse.
pub fn compose_page_text(
    title: Option<&str>,
    h1: Option<&str>,
    first_paragraph: Option<&str>
) -> Option<String> {
    let lines: Vec<String> = [
        ("Заголовок страницы (title)", title),
        ("Главный заголовок (H1)", h1),
        ("Первый абзац", first_paragraph),
    ]
        .into_iter()
        .filter_map(|(label, value)| non_blank(value).map(|v| format!("{}: {}", label, v)))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

pub fn text_prompt(text: &str) -> Prompt {
    Prompt {
        mode: PromptMode::Text,
        messages: vec![
            ChatMessage::system(PromptMode::Text.system_prompt()),
            ChatMessage::user(format!("Проанализируй текст конкурента:\n\n{}", text))
        ],
    }
}

pub fn image_prompt(image: &[u8], mime_type: &str) -> Prompt {
    Prompt {
        mode: PromptMode::Image,
        messages: vec![
            ChatMessage::system(PromptMode::Image.system_prompt()),
            ChatMessage::user_parts(
                vec![
                    ContentPart::Text { text: IMAGE_INSTRUCTION.to_string() },
                    image_part(image, mime_type)
                ]
            )
        ],
    }
}

pub fn combined_prompt(screenshot: &[u8], mime_type: &str, page: &PageContext<'_>) -> Prompt {
    let text = format!(
        "Проведи комплексный конкурентный анализ этого сайта:\n\n{}",
        context_block(page)
    );

    Prompt {
        mode: PromptMode::Combined,
        messages: vec![
            ChatMessage::system(PromptMode::Combined.system_prompt()),
            ChatMessage::user_parts(vec![ContentPart::Text { text }, image_part(screenshot, mime_type)])
        ],
    }
}

/// URL plus whatever page text is available, paragraph truncated
pub fn context_block(page: &PageContext<'_>) -> String {
    let mut lines = vec![format!("URL сайта: {}", page.url)];
    if let Some(title) = non_blank(page.title) {
        lines.push(format!("Title страницы: {}", title));
    }
    if let Some(h1) = non_blank(page.h1) {
        lines.push(format!("Главный заголовок (H1): {}", h1));
    }
    if let Some(paragraph) = non_blank(page.first_paragraph) {
        let clipped: String = paragraph.chars().take(CONTEXT_PARAGRAPH_LIMIT).collect();
        lines.push(format!("Текст на странице: {}", clipped));
    }
    lines.join("\n")
}

/// `data:` URL embedding the image as base64
pub fn data_url(image: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(image))
}

fn image_part(image: &[u8], mime_type: &str) -> ContentPart {
    ContentPart::ImageUrl { image_url: ImageUrl { url: data_url(image, mime_type) } }
}

/// Guess an image MIME type from its magic bytes, JPEG when unknown
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        DEFAULT_IMAGE_MIME
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
