// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine la vue en utilisant les widgets de ratatui :
//
//   ┌──────────── GoFinances ────────────┐   header
//   │ Entradas │ Saídas  │ Total         │   cartes de solde
//   │ Título   Preço   Categoria   Data  │   tableau des transactions
//   │ [q] Sair  [↑↓] Navegar   status    │   footer
//
// CONCEPTS RATATUI :
// 1. Layout : découpage vertical puis horizontal (3 cartes)
// 2. Table : une ligne par transaction, dans l'ordre de l'API
// 3. Style : vert pour les entrées, rouge pour les sorties
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, LoadState};
use crate::format::format_optional;
use crate::models::{Amount, Balance, PresentedTransaction, TransactionType};

/// Couleur de la carte "Total" (orange GoFinances)
const TOTAL_CARD_COLOR: Color = Color::Rgb(255, 135, 44);

// ============================================================================
// Cartes de solde : identifiants stables
// ============================================================================
// Chaque carte a un identifiant fixe ("balance-income", ...) pour que les
// tests automatisés retrouvent la valeur affichée sans dépendre du layout.
// ============================================================================

/// Une des trois cartes de solde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalanceFigure {
    Income,
    Outcome,
    Total,
}

impl BalanceFigure {
    /// Ordre d'affichage, de gauche à droite
    pub const ALL: [BalanceFigure; 3] = [
        BalanceFigure::Income,
        BalanceFigure::Outcome,
        BalanceFigure::Total,
    ];

    /// Identifiant stable pour les tests
    pub fn test_id(&self) -> &'static str {
        match self {
            BalanceFigure::Income => "balance-income",
            BalanceFigure::Outcome => "balance-outcome",
            BalanceFigure::Total => "balance-total",
        }
    }

    /// Titre de la carte
    pub fn label(&self) -> &'static str {
        match self {
            BalanceFigure::Income => "Entradas",
            BalanceFigure::Outcome => "Saídas",
            BalanceFigure::Total => "Total",
        }
    }

    fn amount(&self, balance: &Balance) -> Option<Amount> {
        match self {
            BalanceFigure::Income => balance.income,
            BalanceFigure::Outcome => balance.outcome,
            BalanceFigure::Total => balance.total,
        }
    }
}

/// Texte exact affiché dans la carte `figure`
pub fn balance_figure_text(app: &App, figure: BalanceFigure) -> String {
    format_optional(figure.amount(&app.balance))
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine la vue complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

/// Découpe l'écran : header, cartes, tableau, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Cartes
            Constraint::Min(0),    // Tableau : tout le reste
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" GoFinances ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Listagem de transações",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Cartes : Entradas / Saídas / Total
// ============================================================================

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (figure, column) in BalanceFigure::ALL.iter().zip(columns.iter()) {
        render_card(frame, app, *figure, *column);
    }
}

fn render_card(frame: &mut Frame, app: &App, figure: BalanceFigure, area: Rect) {
    // La carte Total est mise en avant, comme sur la version web
    let card_style = match figure {
        BalanceFigure::Total => Style::default().bg(TOTAL_CARD_COLOR).fg(Color::White),
        _ => Style::default(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(format!(" {} ", figure.label()))
        .style(card_style);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            balance_figure_text(app, figure),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tableau des transactions
// ============================================================================

/// Style de la colonne Preço selon le sens de la transaction
fn value_style(kind: TransactionType) -> Style {
    match kind {
        TransactionType::Income => Style::default().fg(Color::Green),
        TransactionType::Outcome => Style::default().fg(Color::Red),
    }
}

fn transaction_row(transaction: &PresentedTransaction) -> Row<'_> {
    Row::new(vec![
        Cell::from(transaction.transaction.title.as_str()),
        Cell::from(transaction.formatted_value.as_str()).style(value_style(transaction.kind())),
        Cell::from(transaction.transaction.category.title.as_str()),
        Cell::from(transaction.formatted_date.as_str()),
    ])
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Título", "Preço", "Categoria", "Data"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    // Pas de tri : ordre de l'API
    let rows: Vec<Row> = app.transactions.iter().map(transaction_row).collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if !app.transactions.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

// ============================================================================
// Footer : raccourcis + état du chargement
// ============================================================================

fn status_span(app: &App) -> Span<'_> {
    match &app.load_state {
        LoadState::Idle => Span::raw(""),
        LoadState::Loading => Span::styled(
            "Carregando transações...",
            Style::default().fg(Color::Yellow),
        ),
        LoadState::Loaded => Span::styled(
            format!("{} transações", app.transactions.len()),
            Style::default().fg(Color::Gray),
        ),
        LoadState::Failed(message) => Span::styled(
            format!("Erro ao carregar: {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let line = Line::from(vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Sair  "),
        Span::styled("[↑↓ / j k]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Navegar   "),
        status_span(app),
    ]);

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FetchError, TransactionSource, TransactionsResponse};
    use crate::format::{format_value, MISSING_VALUE};
    use crate::worker::execute;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const RESPONSE: &str = r#"{
        "transactions": [
            {
                "id": "a1", "title": "Salário", "value": 200, "type": "income",
                "category": { "title": "Trabalho" }, "created_at": "2020-05-03T10:00:00Z"
            },
            {
                "id": "b2", "title": "Mercado", "value": 75, "type": "outcome",
                "category": { "title": "Alimentação" }, "created_at": "2020-05-04T10:00:00Z"
            }
        ],
        "balance": { "income": 200, "outcome": 75, "total": 125 }
    }"#;

    /// Source factice qui renvoie une réponse JSON fixe
    struct FixedSource(&'static str);

    impl TransactionSource for FixedSource {
        async fn fetch(&self) -> Result<TransactionsResponse, FetchError> {
            Ok(serde_json::from_str(self.0)?)
        }
    }

    fn draw(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    async fn loaded_app() -> App {
        let mut app = App::new();
        let command = app.mount().unwrap();
        let result = execute(&FixedSource(RESPONSE), command).await;
        assert!(app.commit(result));
        app
    }

    #[test]
    fn test_figure_ids_are_stable() {
        let ids: Vec<&str> = BalanceFigure::ALL.iter().map(|f| f.test_id()).collect();
        assert_eq!(ids, vec!["balance-income", "balance-outcome", "balance-total"]);
    }

    #[test]
    fn test_initial_render_is_empty() {
        let app = App::new();
        let lines = draw(&app);
        let screen = lines.join("\n");

        for figure in BalanceFigure::ALL {
            assert_eq!(balance_figure_text(&app, figure), MISSING_VALUE);
        }
        assert!(screen.contains("Título"));
        assert!(!screen.contains("R$\u{a0}0,00"));
    }

    #[tokio::test]
    async fn test_loaded_view_shows_rows_and_figures() {
        let app = loaded_app().await;

        assert_eq!(balance_figure_text(&app, BalanceFigure::Income), format_value(Amount::from(200)));
        assert_eq!(balance_figure_text(&app, BalanceFigure::Outcome), format_value(Amount::from(75)));
        assert_eq!(balance_figure_text(&app, BalanceFigure::Total), format_value(Amount::from(125)));

        let lines = draw(&app);
        let screen = lines.join("\n");
        for figure in BalanceFigure::ALL {
            assert!(screen.contains(&balance_figure_text(&app, figure)));
        }

        // Exactement deux lignes de transactions, dans l'ordre de l'API
        let row_lines: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains("/05/2020"))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(row_lines.len(), 2);

        let income_row = &lines[row_lines[0]];
        let outcome_row = &lines[row_lines[1]];
        assert!(income_row.contains("Salário"));
        assert!(income_row.contains("03/05/2020"));
        assert!(outcome_row.contains("Mercado"));
        assert!(outcome_row.contains("Alimentação"));
        assert!(outcome_row.contains(&format!("- {}", format_value(Amount::from(75)))));
    }

    #[tokio::test]
    async fn test_value_cells_are_coloured_by_type() {
        let app = loaded_app().await;

        assert_eq!(value_style(app.transactions[0].kind()).fg, Some(Color::Green));
        assert_eq!(value_style(app.transactions[1].kind()).fg, Some(Color::Red));
    }

    #[test]
    fn test_failed_load_shows_error_and_no_rows() {
        let mut app = App::new();
        app.mount();
        app.commit(crate::worker::AppResult::LoadError {
            mount_id: app.mount_id(),
            error: "HTTP 500".to_string(),
        });

        let lines = draw(&app);
        let screen = lines.join("\n");
        assert!(screen.contains("Erro ao carregar: HTTP 500"));
        assert!(!lines.iter().any(|line| line.contains("/20")));
        assert_eq!(balance_figure_text(&app, BalanceFigure::Total), MISSING_VALUE);
    }
}
