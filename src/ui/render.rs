// Frame rendering - 한 프레임 그리기
//
// 패널, 상태바, 버튼 바, 경고 화면, 그리고 열려 있는 다이얼로그를
// 조합해 한 프레임을 구성한다.

use crate::app::App;
use crate::core::actions::button_labels;
use crate::ui::components::{
    ButtonBar, ConfirmState, Dialog, InputState, Panel, PanelStatus, StatusBar, WarningScreen,
};
use crate::ui::layout::ActivePanel;
use crate::ui::InputFocus;
use crate::utils::formatter::format_file_size;
use ratatui::layout::Rect;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// 패널 위젯 생성 + 렌더링 (좌/우 공통)
fn render_panel(f: &mut Frame<'_>, app: &App, which: ActivePanel, area: Rect) {
    let panel_state = match which {
        ActivePanel::Left => &app.left_panel,
        ActivePanel::Right => &app.right_panel,
    };
    let is_active = app.layout.active_panel() == which;

    let path = panel_state.current_path.to_string_lossy();
    let panel = Panel::new()
        .title(&path)
        .status(if is_active {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        })
        .entries(&panel_state.entries)
        .selected_index(panel_state.selected_index)
        .scroll_offset(panel_state.scroll_offset)
        .classifier(&app.classifier)
        .theme(app.theme_manager.current());
    f.render_widget(panel, area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let active = app.active_panel_state();
    let total_size = format_file_size(active.total_size());
    let path = active.current_path.to_string_lossy();

    let status_bar = StatusBar::new()
        .file_count(active.file_count())
        .dir_count(active.dir_count())
        .total_size(&total_size)
        .path(&path)
        .toast(app.active_toast())
        .theme(app.theme_manager.current());
    f.render_widget(status_bar, area);
}

/// 메인 UI 렌더링
pub fn draw_main(f: &mut Frame<'_>, app: &App) {
    let theme = app.theme_manager.current();

    if app.layout.is_too_small() {
        let (width, height) = app.layout.terminal_size();
        let warning = WarningScreen::new().current_size(width, height).theme(theme);
        f.render_widget(warning, f.area());
        return;
    }

    let areas = app.layout.areas().clone();

    render_panel(f, app, ActivePanel::Left, areas.left_panel);
    render_panel(f, app, ActivePanel::Right, areas.right_panel);
    render_status_bar(f, app, areas.status_bar);

    let button_bar = ButtonBar::new()
        .labels(button_labels())
        .rects(app.layout.button_rects())
        .theme(theme);
    f.render_widget(button_bar, areas.button_bar);
}

/// 확인 다이얼로그를 얹어서 렌더링
pub fn draw_confirm_overlay(f: &mut Frame<'_>, app: &App, state: &ConfirmState) {
    draw_main(f, app);
    let dialog = Dialog::confirm(state).theme(app.theme_manager.current());
    f.render_widget(dialog, f.area());
}

/// 입력 다이얼로그를 얹어서 렌더링 (텍스트 필드 포커스 시 커서 표시)
pub fn draw_input_overlay(f: &mut Frame<'_>, app: &App, state: &InputState) {
    draw_main(f, app);
    let dialog = Dialog::input(state).theme(app.theme_manager.current());
    f.render_widget(dialog, f.area());

    if state.focus == InputFocus::Text {
        if let Some(field) = state.geometry.input_field {
            let visible = field.width.saturating_sub(3) as usize;
            let cursor_offset = state.value.width().min(visible) as u16;
            f.set_cursor_position((field.x + 2 + cursor_offset, field.y));
        }
    }
}
