#![allow(dead_code)]

use crate::ui::classify::FileCategory;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 색상 테마 시스템
///
/// 애플리케이션 전체의 색상 테마를 관리합니다.
/// TOML 파일에서 테마를 로드하거나 미리 정의된 테마를 사용할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 패널
    pub panel_active_border: ColorDef,
    pub panel_inactive_border: ColorDef,
    pub panel_bg: ColorDef,

    // 파일 리스트 (분류 카테고리별)
    pub file_normal: ColorDef,
    pub file_selected: ColorDef,
    pub file_selected_bg: ColorDef,
    pub directory: ColorDef,
    pub executable: ColorDef,
    pub text_file: ColorDef,
    pub archive: ColorDef,
    pub media: ColorDef,

    // UI 컴포넌트
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub button_bg: ColorDef,
    pub button_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    /// ColorDef를 ratatui의 Color로 변환
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(hex) => parse_hex_color(hex),
            ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            // 배경/전경
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            // 패널
            panel_active_border: "#0078d4".into(),
            panel_inactive_border: "#3c3c3c".into(),
            panel_bg: "#1e1e1e".into(),

            // 파일 리스트
            file_normal: "#d4d4d4".into(),
            file_selected: "#ffffff".into(),
            file_selected_bg: "#0078d4".into(),
            directory: "#569cd6".into(),
            executable: "#4ec9b0".into(),
            text_file: "#dcdcaa".into(),
            archive: "#c586c0".into(),
            media: "#ce9178".into(),

            // UI 컴포넌트
            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            button_bg: "#2d2d30".into(),
            button_fg: "#cccccc".into(),

            // 강조
            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            // 배경/전경
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),

            // 패널
            panel_active_border: "#0078d4".into(),
            panel_inactive_border: "#cccccc".into(),
            panel_bg: "#ffffff".into(),

            // 파일 리스트
            file_normal: "#1e1e1e".into(),
            file_selected: "#000000".into(),
            file_selected_bg: "#add6ff".into(),
            directory: "#0066cc".into(),
            executable: "#008080".into(),
            text_file: "#795e26".into(),
            archive: "#af00db".into(),
            media: "#a65e2b".into(),

            // UI 컴포넌트
            status_bar_bg: "#0078d4".into(),
            status_bar_fg: "#ffffff".into(),
            button_bg: "#f3f3f3".into(),
            button_fg: "#1e1e1e".into(),

            // 강조
            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// 분류 카테고리에 해당하는 행 색상
    pub fn category_color(&self, category: FileCategory) -> Color {
        match category {
            FileCategory::Directory => self.directory.to_color(),
            FileCategory::Executable => self.executable.to_color(),
            FileCategory::Text => self.text_file.to_color(),
            FileCategory::Archive => self.archive.to_color(),
            FileCategory::Media => self.media.to_color(),
            FileCategory::Other => self.file_normal.to_color(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: PathBuf) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }

    /// 테마를 TOML 파일로 저장
    pub fn save_to_file(&self, path: PathBuf) -> Result<(), anyhow::Error> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 관리하고 런타임에 테마를 전환합니다.
pub struct ThemeManager {
    current_name: String,
    current_theme: Theme,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_name: "dark".to_string(),
            current_theme: Theme::dark(),
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
            ],
        }
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.current_theme
    }

    /// 현재 테마 이름 반환
    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        if let Some((found, theme)) = self.available_themes.iter().find(|(n, _)| n == name) {
            self.current_name = found.clone();
            self.current_theme = theme.clone();
            Ok(())
        } else {
            Err(format!("Unknown theme: {}", name))
        }
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        let current_index = self
            .available_themes
            .iter()
            .position(|(name, _)| *name == self.current_name)
            .unwrap_or(0);

        let next_index = (current_index + 1) % self.available_themes.len();
        self.current_name = self.available_themes[next_index].0.clone();
        self.current_theme = self.available_themes[next_index].1.clone();
    }

    /// 커스텀 테마 추가
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        self.available_themes.push((name, theme));
    }

    /// 설정 디렉토리에서 테마 파일 로드
    pub fn load_themes_from_config_dir(&mut self) -> Result<(), anyhow::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let themes_dir = config_dir.join("duodir").join("themes");

            if themes_dir.exists() {
                for entry in fs::read_dir(themes_dir)? {
                    let entry = entry?;
                    let path = entry.path();

                    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                        if let Ok(theme) = Theme::from_file(path.clone()) {
                            let name = path
                                .file_stem()
                                .and_then(|s| s.to_str())
                                .unwrap_or("custom")
                                .to_string();

                            self.add_theme(name, theme);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let theme = Theme::dark();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(30, 30, 30));
    }

    #[test]
    fn test_light_theme_creation() {
        let theme = Theme::light();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_hex_color_parsing() {
        let color = parse_hex_color("#1e1e1e");
        assert_eq!(color, Color::Rgb(30, 30, 30));
    }

    #[test]
    fn test_named_color_parsing() {
        assert_eq!(parse_named_color("red"), Color::Red);
        assert_eq!(parse_named_color("blue"), Color::Blue);
        assert_eq!(parse_named_color("unknown"), Color::Reset);
    }

    #[test]
    fn test_theme_switching() {
        let mut manager = ThemeManager::new();
        assert_eq!(manager.current_name(), "dark");

        assert!(manager.switch_theme("light").is_ok());
        assert_eq!(manager.current_name(), "light");
        assert_eq!(
            manager.current().bg_primary.to_color(),
            Color::Rgb(255, 255, 255)
        );

        assert!(manager.switch_theme("nope").is_err());
        assert_eq!(manager.current_name(), "light");
    }

    #[test]
    fn test_theme_cycling() {
        let mut manager = ThemeManager::new();
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "light");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "dark");
    }

    #[test]
    fn test_category_colors_differ_from_normal() {
        let theme = Theme::dark();
        assert_ne!(
            theme.category_color(FileCategory::Directory),
            theme.category_color(FileCategory::Other)
        );
    }
}
