use crate::commands::{CommandContext, CommandResult, ImportKind};
use onemapan::api::models::{Locality, UNKNOWN_LABEL};
use onemapan::api::ListQuery;
use onemapan::error::auth_error;
use rust_i18n::t;
use std::path::Path;

fn list_query(page: u64, limit: u64, search: Option<String>) -> ListQuery {
    ListQuery {
        page: page.max(1),
        limit: limit.max(1),
        search,
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn city_label(locality: Option<&Locality>) -> &str {
    locality
        .and_then(|locality| locality.city_name())
        .unwrap_or(UNKNOWN_LABEL)
}

fn print_paging(total: Option<u64>, current: Option<u64>, pages: Option<u64>) {
    if let (Some(current), Some(pages)) = (current, pages) {
        println!("-- page {}/{} ({} total)", current, pages, total.unwrap_or(0));
    }
}

pub async fn list_users(
    ctx: &CommandContext,
    page: u64,
    limit: u64,
    search: Option<String>,
) -> CommandResult {
    ctx.require_session()?;
    let result = ctx.api.list_users(&list_query(page, limit, search)).await?;

    if result.data.is_empty() {
        println!("{}", t!("cli.no_records"));
    }
    for user in &result.data {
        println!(
            "{:>6}  {:<28} {:<10} {:<10} {}",
            user.user_id.map(|id| id.to_string()).unwrap_or_default(),
            or_dash(user.full_name.as_deref()),
            or_dash(user.area.as_deref()),
            or_dash(user.spiritual_status.as_deref()),
            city_label(user.locality.as_ref())
        );
    }
    print_paging(result.total, result.current_page, result.total_pages);
    Ok(())
}

pub async fn list_qiudao(
    ctx: &CommandContext,
    page: u64,
    limit: u64,
    search: Option<String>,
) -> CommandResult {
    ctx.require_session()?;
    let result = ctx.api.list_qiudao(&list_query(page, limit, search)).await?;

    if result.data.is_empty() {
        println!("{}", t!("cli.no_records"));
    }
    for qiudao in &result.data {
        let dcs = qiudao
            .dian_chuan_shi
            .as_ref()
            .and_then(|dcs| dcs.name.as_deref());
        let fotang = qiudao
            .fotang
            .as_ref()
            .and_then(|fotang| fotang.location_name.as_deref());
        println!(
            "{:>6}  {:<28} {:<12} {:<20} {}",
            qiudao.qiu_dao_id.map(|id| id.to_string()).unwrap_or_default(),
            or_dash(qiudao.qiu_dao_name.as_deref()),
            or_dash(qiudao.greg_qiu_dao_date.as_deref()),
            or_dash(dcs),
            or_dash(fotang)
        );
    }
    print_paging(result.total, result.current_page, result.total_pages);
    Ok(())
}

/// Upload an import sheet; managers only
pub async fn import(ctx: &CommandContext, kind: ImportKind, file: &Path) -> CommandResult {
    if !ctx.require_session()?.can_manage() {
        return Err(auth_error(&t!("cli.forbidden")));
    }

    let response = match kind {
        ImportKind::Users => ctx.api.import_users(file).await?,
        ImportKind::Qiudao => ctx.api.import_qiudao(file).await?,
    };

    println!("{}", t!("cli.imported", file = file.display()));
    if !response.is_null() {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

pub async fn list_dianchuanshi(ctx: &CommandContext) -> CommandResult {
    ctx.require_session()?;
    for dcs in ctx.api.list_dianchuanshi().await? {
        println!(
            "{:>6}  {:<28} {:<12} {}",
            dcs.id.map(|id| id.to_string()).unwrap_or_default(),
            or_dash(dcs.name.as_deref()),
            or_dash(dcs.mandarin_name.as_deref()),
            or_dash(dcs.area.as_deref())
        );
    }
    Ok(())
}

pub async fn list_institutions(ctx: &CommandContext) -> CommandResult {
    ctx.require_session()?;
    for institution in ctx.api.list_institutions().await? {
        println!(
            "{:>6}  {:<36} {}",
            institution
                .institution_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            or_dash(institution.institution_name.as_deref()),
            or_dash(institution.institution_leader.as_deref())
        );
    }
    Ok(())
}

pub async fn list_fotang(ctx: &CommandContext) -> CommandResult {
    ctx.require_session()?;
    for fotang in ctx.api.list_fotang().await? {
        println!(
            "{:>6}  {:<36} {:<10} {}",
            fotang.fotang_id.map(|id| id.to_string()).unwrap_or_default(),
            or_dash(fotang.location_name.as_deref()),
            or_dash(fotang.area.as_deref()),
            city_label(fotang.locality.as_ref())
        );
    }
    Ok(())
}

/// Walk the location tree one level at a time
pub async fn list_locations(
    ctx: &CommandContext,
    province: Option<i64>,
    city: Option<i64>,
    district: Option<i64>,
) -> CommandResult {
    ctx.require_session()?;

    let rows: Vec<(Option<i64>, Option<String>)> = match (province, city, district) {
        (_, _, Some(district)) => ctx
            .api
            .list_localities(district)
            .await?
            .into_iter()
            .map(|l| (l.locality_id, l.name))
            .collect(),
        (_, Some(city), None) => ctx
            .api
            .list_districts(city)
            .await?
            .into_iter()
            .map(|d| (d.district_id, d.name))
            .collect(),
        (Some(province), None, None) => ctx
            .api
            .list_cities(province)
            .await?
            .into_iter()
            .map(|c| (c.city_id, c.name))
            .collect(),
        (None, None, None) => ctx
            .api
            .list_provinces()
            .await?
            .into_iter()
            .map(|p| (p.province_id, p.name))
            .collect(),
    };

    if rows.is_empty() {
        println!("{}", t!("cli.no_records"));
    }
    for (id, name) in rows {
        println!(
            "{:>6}  {}",
            id.map(|id| id.to_string()).unwrap_or_default(),
            or_dash(name.as_deref())
        );
    }
    Ok(())
}
