//! Drawing
//!
//! Builds the two tab views, the reset modal, and the item detail
//! popup from session-derived view models.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::query::CategoryFilter;
use crate::session::{CategoryGroup, ItemRow, PriceView, Session};

use super::app::{visible_rows, App, InputMode, Tab};

/// Render one full frame
pub fn draw(frame: &mut Frame, app: &App, session: &Session) {
    frame.render_widget(Clear, frame.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tabs(frame, app, layout[0]);
    match app.tab {
        Tab::Items => draw_items_tab(frame, app, session, layout[1]),
        Tab::Price => draw_price_tab(frame, app, session, layout[1]),
    }
    draw_help_bar(frame, app, layout[2]);

    if app.show_detail {
        draw_detail_popup(frame, app, session);
    }
    if app.show_reset_modal {
        draw_reset_modal(frame);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab {
        Tab::Items => 0,
        Tab::Price => 1,
    };
    let tabs = Tabs::new(vec!["アイテム一覧", "値段検索"])
        .block(Block::default().borders(Borders::ALL).title(" 識別チェッカー "))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_items_tab(frame: &mut Frame, app: &App, session: &Session, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Filter input plus the current sort / category settings
    let category_label = match &session.query().category {
        CategoryFilter::All => "全て".to_string(),
        CategoryFilter::Only(category) => category.clone(),
    };
    let input_style = if app.input_mode == InputMode::EditFilter {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.filter_input.as_str()).style(input_style).block(
        Block::default().borders(Borders::ALL).title(format!(
            " 検索  [{} / {}] ",
            session.query().sort.label(),
            category_label
        )),
    );
    frame.render_widget(input, layout[0]);

    let groups = session.catalog_view();
    if groups.is_empty() {
        draw_empty_state(
            frame,
            layout[1],
            &["該当するアイテムが見つかりません", "検索条件を変更してみてください"],
        );
        return;
    }

    draw_grouped_list(frame, layout[1], &groups, app.items_cursor, " アイテム ");
}

fn draw_price_tab(frame: &mut Frame, app: &App, session: &Session, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let flags = session.query().price_flags;
    let flag_mark = |on: bool| if on { "◉" } else { "○" };
    let input = Paragraph::new(app.price_input.as_str()).block(
        Block::default().borders(Borders::ALL).title(format!(
            " 値段 (G)  [買{} 売{}] ",
            flag_mark(flags.buy),
            flag_mark(flags.sell)
        )),
    );
    frame.render_widget(input, layout[0]);

    match session.price_view() {
        PriceView::Idle => {
            draw_empty_state(frame, layout[1], &["値段を入力すると検索結果が表示されます"]);
        }
        PriceView::Invalid => {
            draw_empty_state(frame, layout[1], &["有効な値段を入力してください"]);
        }
        PriceView::NoMatch(target) => {
            let message = format!("{}Gのアイテムは見つかりませんでした", target);
            draw_empty_state(frame, layout[1], &[message.as_str()]);
        }
        PriceView::Matches { target, groups } => {
            let title = format!(" {}G の候補 ", target);
            draw_grouped_list(frame, layout[1], &groups, app.price_cursor, &title);
        }
    }
}

/// Shared grouped list: category headers with counts, then item rows
/// with an identification mark and base buy/sell prices
fn draw_grouped_list(
    frame: &mut Frame,
    area: Rect,
    groups: &[CategoryGroup<'_>],
    cursor: usize,
    title: &str,
) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut flat_index = 0;

    for group in groups {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", group.category, group.items.len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        for row in &group.items {
            let is_selected = flat_index == cursor;
            if is_selected {
                selected_line = lines.len();
            }
            lines.push(item_line(row, is_selected));
            flat_index += 1;
        }
    }

    let height = area.height.saturating_sub(2) as usize;
    let offset = if height > 0 && selected_line >= height {
        (selected_line - height + 1) as u16
    } else {
        0
    };

    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .scroll((offset, 0));
    frame.render_widget(list, area);
}

fn item_line<'a>(row: &ItemRow<'a>, is_selected: bool) -> Line<'a> {
    let prefix = if is_selected { "> " } else { "  " };
    let mark = if row.identified { "[x]" } else { "[ ]" };
    let mark_style = if row.identified {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let name_style = if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(prefix),
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(row.item.name.clone(), name_style),
        Span::styled(
            format!("  買:{}G 売:{}G", row.buy_price(), row.sell_price()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn draw_empty_state(frame: &mut Frame, area: Rect, messages: &[&str]) {
    let mut lines = vec![Line::from("")];
    for message in messages {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.show_reset_modal {
        "y: リセット実行  n/Esc: キャンセル"
    } else if app.input_mode == InputMode::EditFilter {
        "文字入力で絞り込み  Enter/Esc: 入力終了"
    } else {
        match app.tab {
            Tab::Items => {
                "↑↓: 選択  Enter: 識別切替  /: 検索  s: 並び替え  c: カテゴリ  d: 詳細  r: リセット  Tab: 値段検索  q: 終了"
            }
            Tab::Price => {
                "数字: 値段入力  b/s: 買値/売値  ↑↓: 選択  Enter: 識別切替  d: 詳細  Tab: 一覧  q: 終了"
            }
        }
    };
    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}

fn draw_detail_popup(frame: &mut Frame, app: &App, session: &Session) {
    let rows = visible_rows(app, session);
    let Some(row) = rows.get(app.cursor()) else {
        return;
    };

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let identified = if row.identified { "識別済み" } else { "未識別" };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", row.item.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {} / {}", row.item.category, identified),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(format!("  {}", row.item.effect)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  買値: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}G", row.buy_price())),
            Span::styled("  売値: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}G", row.sell_price())),
        ]),
    ];

    let popup = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" 詳細 "));
    frame.render_widget(popup, area);
}

fn draw_reset_modal(frame: &mut Frame) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from("  すべての識別状態をリセットしますか？"),
        Line::from(""),
        Line::from(Span::styled(
            "  保存データも削除されます。この操作は取り消せません。",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from("  y: 実行  n: キャンセル"),
    ];

    let modal = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" リセット確認 "));
    frame.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
