use crate::commands::{CommandContext, CommandResult};
use chrono::{TimeZone, Utc};
use onemapan::session::NATIONAL_AREA;
use rust_i18n::t;

pub async fn login(ctx: &CommandContext, username: &str, password: &str) -> CommandResult {
    let session = ctx.api.login(username, password).await?;
    ctx.store.save(&session)?;

    let role = session.claims().role.clone().unwrap_or_default();
    let area = session.area().unwrap_or(NATIONAL_AREA);
    println!("{}", t!("cli.logged_in", role = role, area = area));
    Ok(())
}

pub fn logout(ctx: &CommandContext) -> CommandResult {
    ctx.store.clear()?;
    println!("{}", t!("cli.logged_out"));
    Ok(())
}

pub fn whoami(ctx: &CommandContext) -> CommandResult {
    let Some(session) = ctx.api.session() else {
        println!("{}", t!("cli.not_logged_in"));
        return Ok(());
    };

    let claims = session.claims();
    println!("user:   {}", claims.sub.as_deref().unwrap_or("-"));
    println!("role:   {:?}", session.role());
    println!("scope:  {:?}", session.scope());
    println!("area:   {}", session.area().unwrap_or(NATIONAL_AREA));
    if let Some(exp) = claims.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single()) {
        println!("expires: {}", exp.to_rfc3339());
    }
    Ok(())
}

pub async fn register(
    ctx: &CommandContext,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> CommandResult {
    ctx.api
        .register(username, email, password, confirm_password)
        .await?;
    // Shown once by the next command, typically `login`
    ctx.store.set_flash(&t!("cli.registered"))?;
    Ok(())
}
