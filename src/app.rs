#![allow(dead_code)]

use crate::models::PanelState;
use crate::system::FileSystem;
use crate::ui::{ActivePanel, FileClassifier, LayoutManager, ThemeManager};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod dialogs;
pub mod input;
pub mod operations;

#[cfg(test)]
mod tests;

/// 토스트 메시지 표시 시간
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// 같은 행 두 번째 릴리즈를 더블 클릭으로 인정하는 시간
pub(crate) const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedAppState {
    version: u32,
    theme: String,
    left_path: PathBuf,
    right_path: PathBuf,
}

/// 패널 행 클릭 추적 (더블 클릭 판정용)
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowClick {
    panel: ActivePanel,
    index: usize,
    at: Instant,
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 좌측 패널
    pub left_panel: PanelState,
    /// 우측 패널
    pub right_panel: PanelState,
    /// 파일 시스템
    pub filesystem: FileSystem,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 파일 분류기 (뷰 레이어 전용 컨텍스트)
    pub classifier: FileClassifier,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    /// 마지막 패널 행 클릭 (더블 클릭 추적)
    pub(crate) last_row_click: Option<RowClick>,
    /// 기본 터미널 에디터 명령 (환경변수 기반)
    default_editor: String,
    /// 테스트에서 설정 저장 경로를 격리하기 위한 override
    state_store_override: Option<PathBuf>,
}

impl App {
    const APP_STATE_VERSION: u32 = 1;
    const FALLBACK_EDITOR: &'static str = "vi";

    fn resolve_default_editor_from_env() -> String {
        for key in ["VISUAL", "EDITOR"] {
            if let Ok(value) = env::var(key) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
        Self::FALLBACK_EDITOR.to_string()
    }

    pub fn new() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| {
            #[cfg(unix)]
            {
                PathBuf::from("/")
            }
            #[cfg(not(unix))]
            {
                PathBuf::from(".")
            }
        });

        let filesystem = FileSystem::new();

        // 패널 초기화. 읽기 실패 시 빈 패널로 시작한다 (치명적 아님)
        let mut left_panel = PanelState::new(current_dir.clone());
        let _ = left_panel.reload(&filesystem);

        let mut right_panel = PanelState::new(current_dir);
        let _ = right_panel.reload(&filesystem);

        let mut theme_manager = ThemeManager::new();
        let _ = theme_manager.load_themes_from_config_dir();

        let mut app = Self {
            should_quit: false,
            layout: LayoutManager::new(),
            left_panel,
            right_panel,
            filesystem,
            theme_manager,
            classifier: FileClassifier::new(),
            toast_message: None,
            last_row_click: None,
            default_editor: Self::resolve_default_editor_from_env(),
            state_store_override: None,
        };
        app.load_persisted_state();
        app
    }

    #[cfg(test)]
    pub(crate) fn new_for_test() -> Self {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static TEST_APP_COUNTER: AtomicUsize = AtomicUsize::new(0);
        let suffix = TEST_APP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let state_store_override = std::env::temp_dir().join(format!(
            "duodir-test-settings-{}-{}.toml",
            std::process::id(),
            suffix
        ));

        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            left_panel: PanelState::new(PathBuf::from(".")),
            right_panel: PanelState::new(PathBuf::from(".")),
            filesystem: FileSystem::new(),
            theme_manager: ThemeManager::new(),
            classifier: FileClassifier::new(),
            toast_message: None,
            last_row_click: None,
            default_editor: Self::FALLBACK_EDITOR.to_string(),
            state_store_override: Some(state_store_override),
        }
    }

    /// 종료
    pub fn quit(&mut self) {
        let _ = self.save_persisted_state();
        self.should_quit = true;
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 패널 전환 (Tab)
    pub fn toggle_panel(&mut self) {
        self.layout.toggle_panel();
    }

    /// 활성 패널 반환
    pub fn active_panel(&self) -> ActivePanel {
        self.layout.active_panel()
    }

    /// 특정 패널 상태 반환
    pub fn panel(&self, which: ActivePanel) -> &PanelState {
        match which {
            ActivePanel::Left => &self.left_panel,
            ActivePanel::Right => &self.right_panel,
        }
    }

    /// 특정 패널 상태 반환 (mutable)
    pub fn panel_mut(&mut self, which: ActivePanel) -> &mut PanelState {
        match which {
            ActivePanel::Left => &mut self.left_panel,
            ActivePanel::Right => &mut self.right_panel,
        }
    }

    /// 활성 패널 상태 반환
    pub fn active_panel_state(&self) -> &PanelState {
        self.panel(self.layout.active_panel())
    }

    /// 활성 패널 상태 반환 (mutable)
    pub fn active_panel_state_mut(&mut self) -> &mut PanelState {
        self.panel_mut(self.layout.active_panel())
    }

    /// 비활성 패널 상태 반환
    pub fn inactive_panel_state(&self) -> &PanelState {
        match self.layout.active_panel() {
            ActivePanel::Left => &self.right_panel,
            ActivePanel::Right => &self.left_panel,
        }
    }

    /// 활성 패널의 커서 이동
    pub fn move_selection_active(&mut self, delta: isize) {
        match self.layout.active_panel() {
            ActivePanel::Left => self.left_panel.move_selection(delta),
            ActivePanel::Right => self.right_panel.move_selection(delta),
        }
    }

    /// 활성 패널의 선택 디렉토리로 진입
    pub fn enter_selected(&mut self) -> Result<()> {
        match self.layout.active_panel() {
            ActivePanel::Left => self.left_panel.enter_directory(&self.filesystem),
            ActivePanel::Right => self.right_panel.enter_directory(&self.filesystem),
        }
    }

    /// 양쪽 패널 새로고침 (작업 후 호출, 실패한 쪽은 빈 패널)
    pub fn reload_panels(&mut self) {
        let _ = self.left_panel.reload(&self.filesystem);
        let _ = self.right_panel.reload(&self.filesystem);
    }

    /// 레이아웃 영역을 패널 뷰포트에 반영
    pub fn sync_panel_viewports(&mut self) {
        let left = self.layout.areas().left_panel;
        let right = self.layout.areas().right_panel;
        self.left_panel.set_viewport(left.width, left.height);
        self.right_panel.set_viewport(right.width, right.height);
    }

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 아직 유효한 토스트 메시지 반환
    pub fn active_toast(&self) -> Option<&str> {
        self.toast_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < TOAST_DURATION)
            .map(|(message, _)| message.as_str())
    }

    /// 기본 에디터 명령 반환
    pub fn default_editor(&self) -> &str {
        &self.default_editor
    }

    /// 패널 행 클릭 기록, 더블 클릭이면 true
    ///
    /// 같은 패널 같은 행이 시간 창 안에 두 번 릴리즈되면 더블 클릭으로
    /// 판정하고 추적을 리셋한다. 다른 행 클릭도 추적을 새로 시작한다.
    pub(crate) fn register_row_click(&mut self, panel: ActivePanel, index: usize) -> bool {
        let now = Instant::now();

        if let Some(click) = self.last_row_click {
            if click.panel == panel
                && click.index == index
                && now.duration_since(click.at) < DOUBLE_CLICK_WINDOW
            {
                self.last_row_click = None;
                return true;
            }
        }

        self.last_row_click = Some(RowClick {
            panel,
            index,
            at: now,
        });
        false
    }

    // === 설정 저장/복원 ===

    fn state_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.state_store_override {
            return Some(path.clone());
        }
        if let Ok(custom) = env::var("DUODIR_SETTINGS_FILE") {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join(".duodir").join("settings.toml"))
    }

    fn encode_app_state(&self) -> std::result::Result<String, toml::ser::Error> {
        let payload = PersistedAppState {
            version: Self::APP_STATE_VERSION,
            theme: self.theme_manager.current_name().to_string(),
            left_path: self.left_panel.current_path.clone(),
            right_path: self.right_panel.current_path.clone(),
        };
        toml::to_string_pretty(&payload)
    }

    fn decode_app_state(data: &str) -> Option<PersistedAppState> {
        let parsed: PersistedAppState = toml::from_str(data).ok()?;
        if parsed.version != Self::APP_STATE_VERSION {
            return None;
        }
        if parsed.theme.trim().is_empty() {
            return None;
        }
        Some(parsed)
    }

    fn save_persisted_state(&self) -> std::io::Result<()> {
        let Some(path) = self.state_store_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = self
            .encode_app_state()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, data)
    }

    fn load_persisted_state(&mut self) {
        let Some(path) = self.state_store_path() else {
            return;
        };
        let Ok(data) = fs::read_to_string(path) else {
            return;
        };
        let Some(state) = Self::decode_app_state(&data) else {
            return;
        };

        let _ = self.theme_manager.switch_theme(&state.theme);

        if state.left_path.is_dir() {
            self.left_panel.current_path = state.left_path;
            let _ = self.left_panel.reload(&self.filesystem);
        }
        if state.right_path.is_dir() {
            self.right_panel.current_path = state.right_path;
            let _ = self.right_panel.reload(&self.filesystem);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
