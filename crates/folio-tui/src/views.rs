use folio_schema::{
    ContactInfo, Language, ProfileCard, Project, Session, Skill, SkillBand, ViewBundle,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::form::{ContactForm, Field, SubmitStatus};
use crate::strings::{text, Key};

pub struct ViewContext<'a> {
    pub lang: Language,
    pub session: &'a Session,
    pub shows_profile_panel: bool,
    pub project_cursor: usize,
    pub form: &'a ContactForm,
}

pub fn render(frame: &mut Frame, area: Rect, bundle: &ViewBundle, ctx: &ViewContext) {
    match bundle {
        ViewBundle::Home(card) => home(frame, area, card, ctx),
        ViewBundle::About { visit_count } => about(frame, area, *visit_count, ctx),
        ViewBundle::Skills(skills) => skills_view(frame, area, skills, ctx),
        ViewBundle::Projects(projects) => projects_view(frame, area, projects, ctx),
        ViewBundle::Contact(info) => contact(frame, area, info, ctx),
    }
}

fn title_lines(title: &'static str, tagline: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(tagline, Style::default().fg(Color::Gray))),
        Line::from(""),
    ]
}

fn home(frame: &mut Frame, area: Rect, card: &ProfileCard, ctx: &ViewContext) {
    let (content_area, panel_area) = if ctx.shows_profile_panel {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        (cols[0], Some(cols[1]))
    } else {
        (area, None)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text(ctx.lang, Key::HomeIntro),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            card.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            card.tagline.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];
    for link in &card.social {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} ", link.label),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.url.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), content_area);

    if let Some(panel) = panel_area {
        let portrait = Paragraph::new(vec![
            Line::from(""),
            Line::from("   .-----."),
            Line::from("   | o o |"),
            Line::from("   |  ^  |"),
            Line::from("   | \\_/ |"),
            Line::from("   '-----'"),
        ])
        .block(Block::default().borders(Borders::ALL).title(" profile "));
        frame.render_widget(portrait, panel);
    }
}

fn about(frame: &mut Frame, area: Rect, visit_count: u64, ctx: &ViewContext) {
    let mut lines = title_lines(
        text(ctx.lang, Key::AboutTitle),
        text(ctx.lang, Key::AboutTagline),
    );
    lines.push(Line::from(Span::styled(
        text(ctx.lang, Key::AboutWhoIAm),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(text(ctx.lang, Key::AboutWhoIAmText)));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{visit_count} "),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            text(ctx.lang, Key::AboutVisits),
            Style::default().fg(Color::Gray),
        ),
    ]));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn band_label(lang: Language, band: SkillBand) -> &'static str {
    match band {
        SkillBand::Basic => text(lang, Key::LevelBasic),
        SkillBand::Intermediate => text(lang, Key::LevelIntermediate),
        SkillBand::Advanced => text(lang, Key::LevelAdvanced),
    }
}

fn band_color(band: SkillBand) -> Color {
    match band {
        SkillBand::Basic => Color::Blue,
        SkillBand::Intermediate => Color::Yellow,
        SkillBand::Advanced => Color::Green,
    }
}

fn skills_view(frame: &mut Frame, area: Rect, skills: &[Skill], ctx: &ViewContext) {
    let mut lines = title_lines(
        text(ctx.lang, Key::SkillsTitle),
        text(ctx.lang, Key::SkillsTagline),
    );

    if skills.is_empty() {
        lines.push(Line::from(text(ctx.lang, Key::NoSkills)));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Rows arrive ordered by display_order; group runs by category.
    let mut current_category: Option<&str> = None;
    for skill in skills {
        if current_category != Some(skill.category.as_str()) {
            current_category = Some(skill.category.as_str());
            lines.push(Line::from(Span::styled(
                skill.category.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        let level = skill.level.min(10) as usize;
        let gauge = format!("{}{}", "█".repeat(level), "░".repeat(10 - level));
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<14}", skill.name)),
            Span::styled(gauge, Style::default().fg(band_color(skill.band()))),
            Span::styled(
                format!("  {}", band_label(ctx.lang, skill.band())),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn projects_view(frame: &mut Frame, area: Rect, projects: &[Project], ctx: &ViewContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    frame.render_widget(
        Paragraph::new(title_lines(
            text(ctx.lang, Key::ProjectsTitle),
            text(ctx.lang, Key::ProjectsTagline),
        )),
        rows[0],
    );

    if projects.is_empty() {
        frame.render_widget(
            Paragraph::new(text(ctx.lang, Key::NoProjects)),
            rows[1],
        );
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let selected = ctx.project_cursor.min(projects.len() - 1);
    let items: Vec<ListItem> = projects
        .iter()
        .map(|p| ListItem::new(p.title.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" PROJECTS "))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, cols[0], &mut state);

    let project = &projects[selected];
    let mut detail = vec![Line::from(project.description.clone()), Line::from("")];
    if !project.technologies.is_empty() {
        detail.push(Line::from(
            project
                .technologies
                .iter()
                .map(|t| Span::styled(format!("[{t}] "), Style::default().fg(Color::Yellow)))
                .collect::<Vec<_>>(),
        ));
        detail.push(Line::from(""));
    }
    if let Some(url) = &project.project_url {
        detail.push(Line::from(vec![
            Span::styled(
                format!("{}: ", text(ctx.lang, Key::ViewProject)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", project.title)),
            ),
        cols[1],
    );
}

fn input_box<'a>(
    label: &'static str,
    value: &'a str,
    focused: bool,
    editing: bool,
) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let shown = if value.is_empty() && !(focused && editing) {
        Span::styled(label, Style::default().fg(Color::DarkGray))
    } else if focused && editing {
        Span::raw(format!("{value}_"))
    } else {
        Span::raw(value)
    };
    Paragraph::new(Line::from(shown)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {label} ")),
    )
}

fn contact(frame: &mut Frame, area: Rect, info: &ContactInfo, ctx: &ViewContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    frame.render_widget(
        Paragraph::new(title_lines(
            text(ctx.lang, Key::ContactTitle),
            text(ctx.lang, Key::ContactTagline),
        )),
        rows[0],
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let mut details = vec![Line::from(vec![
        Span::styled("Email  ", Style::default().fg(Color::Gray)),
        Span::raw(info.email.clone()),
    ])];
    if let Some(location) = &info.location {
        details.push(Line::from(vec![
            Span::styled("Where  ", Style::default().fg(Color::Gray)),
            Span::raw(location.clone()),
        ]));
    }
    if let Some(response) = &info.response_time {
        details.push(Line::from(vec![
            Span::styled("Reply  ", Style::default().fg(Color::Gray)),
            Span::raw(response.clone()),
        ]));
    }
    frame.render_widget(
        Paragraph::new(details).block(Block::default().borders(Borders::ALL)),
        cols[0],
    );

    let form_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(cols[1]);

    let form = ctx.form;
    frame.render_widget(
        input_box(
            text(ctx.lang, Key::ContactName),
            &form.name,
            form.focus == Field::Name,
            form.editing,
        ),
        form_rows[0],
    );
    frame.render_widget(
        input_box(
            text(ctx.lang, Key::ContactEmail),
            &form.email,
            form.focus == Field::Email,
            form.editing,
        ),
        form_rows[1],
    );
    frame.render_widget(
        input_box(
            text(ctx.lang, Key::ContactMessage),
            &form.message,
            form.focus == Field::Message,
            form.editing,
        ),
        form_rows[2],
    );

    let (label, color) = match form.status() {
        SubmitStatus::Idle => (text(ctx.lang, Key::SendMessage), Color::Cyan),
        SubmitStatus::Sending => (text(ctx.lang, Key::Sending), Color::Yellow),
        SubmitStatus::Sent => (text(ctx.lang, Key::SentOk), Color::Green),
        SubmitStatus::Failed => (text(ctx.lang, Key::SendFailed), Color::Red),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("[ {label} ]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))),
        form_rows[3],
    );
}
