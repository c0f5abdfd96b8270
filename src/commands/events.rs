use crate::commands::{CommandContext, CommandResult};
use onemapan::components::events::normalize::short_date;
use onemapan::components::events::{DisplayEvent, EventFilter, EventsHandle};
use onemapan::error::auth_error;
use rust_i18n::t;
use std::sync::Arc;

fn handle(ctx: &CommandContext) -> onemapan::error::AppResult<EventsHandle> {
    Ok(EventsHandle::new(
        Arc::new(ctx.api.clone()),
        ctx.display_options()?,
    ))
}

/// List events matching the filter
pub async fn list(
    ctx: &CommandContext,
    filter: &EventFilter,
    by_day: bool,
    strict: bool,
) -> CommandResult {
    let handle = handle(ctx)?;
    let rows = if strict {
        handle.try_display_events(filter).await?
    } else {
        handle.display_events(filter).await
    };

    if rows.is_empty() {
        println!("{}", t!("cli.no_events"));
        return Ok(());
    }

    if by_day {
        print_by_day(&rows, &handle.options().locale);
    } else {
        for row in &rows {
            print_row(row);
        }
    }
    Ok(())
}

fn print_row(row: &DisplayEvent) {
    let time = if row.time.is_empty() { "-" } else { row.time.as_str() };
    println!(
        "#{}/{}  {}  ({}, {})  {}  @ {}",
        row.id, row.occurrence_id, row.name, row.day_of_week, row.date_string, time, row.location
    );
}

fn print_by_day(rows: &[DisplayEvent], locale: &str) {
    for row in rows {
        for day in &row.date_range {
            let time = row.time_for_day(*day);
            println!(
                "{:<16} {:<20} {}",
                short_date(*day, locale),
                time,
                row.name
            );
        }
    }
}

/// Delete an event; managers only
pub async fn delete(ctx: &CommandContext, id: i64) -> CommandResult {
    let session = ctx.require_session()?;
    if !session.can_manage() {
        return Err(auth_error(&t!("cli.forbidden")));
    }

    handle(ctx)?.delete(id).await?;
    println!("{}", t!("cli.deleted", id = id));
    Ok(())
}
