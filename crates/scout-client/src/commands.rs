use chrono::{DateTime, Utc};
use colored::Colorize;
use scout_common::api::{
    CreateReportData, LoginCredentials, RegisterData, ReportsQuery, UserUpdate,
};
use scout_common::{Location, Report, UserProfile};

use crate::error::{Result, ScoutError};
use crate::services::Services;
use crate::tui::widgets::report_list::age;

fn print_report(report: &Report, now: DateTime<Utc>) {
    let counter = format!("✓{}", report.verification_count);
    let counter = if report.verification_count > 0 {
        counter.green()
    } else {
        counter.dimmed()
    };
    let mut line = format!(
        "  {}  {} {}",
        report.id.dimmed(),
        counter,
        report.location_name.bold()
    );
    if let Some(transport) = &report.transport_line {
        line.push_str(&format!(" {}", format!("[{transport}]").cyan()));
    }
    println!("{line}");
    println!(
        "      {}",
        format!("{} · {}", report.username, age(report, now)).dimmed()
    );
}

/// List sightings around a point
pub fn list_reports(services: &Services, query: &ReportsQuery) -> Result<()> {
    let resp = services.reports.get_reports(query)?;
    let now = Utc::now();

    if resp.reports.is_empty() {
        println!("{}", "No sightings found.".dimmed());
        return Ok(());
    }

    for report in resp.reports.iter().filter(|r| !r.is_expired(now)) {
        print_report(report, now);
    }
    println!();
    println!(
        "{}",
        format!(
            "{} of {} sightings (offset {})",
            resp.reports.len(),
            resp.total,
            resp.offset
        )
        .dimmed()
    );
    Ok(())
}

pub fn show_report(services: &Services, id: &str) -> Result<()> {
    let report = services.reports.get_report_by_id(id)?;

    println!("{}", report.location_name.bold());
    println!("  Id:          {}", report.id);
    println!(
        "  Position:    {:.5}, {:.5}",
        report.latitude, report.longitude
    );
    if let Some(transport) = &report.transport_line {
        println!("  Line:        {}", transport.cyan());
    }
    if let Some(description) = &report.description {
        println!("  Details:     {description}");
    }
    println!("  Reported by: {}", report.username);
    println!("  Verified:    {}", report.verification_count);
    println!("  Created:     {}", report.created_at);
    println!("  Expires:     {}", report.expires_at);
    if report.is_verified_by_me {
        println!("  {}", "You verified this sighting.".green());
    }
    Ok(())
}

/// Build the POST /reports body from CLI arguments.
pub fn create_report_data(
    position: Location,
    location_name: &[String],
    transport_line: Option<String>,
    description: Option<String>,
    anonymous: bool,
) -> Result<CreateReportData> {
    let location_name = location_name.join(" ").trim().to_string();
    if location_name.is_empty() {
        return Err(ScoutError::Config("location name is required".to_string()));
    }
    Ok(CreateReportData {
        latitude: position.latitude,
        longitude: position.longitude,
        location_name,
        transport_line,
        description,
        is_anonymous: anonymous.then_some(true),
    })
}

pub fn create_report(services: &Services, data: &CreateReportData) -> Result<()> {
    let report = services.reports.create_report(data)?;
    println!(
        "{} {}",
        "Reported sighting at".green().bold(),
        report.location_name.bold()
    );
    println!("  {}", format!("id {}", report.id).dimmed());
    Ok(())
}

pub fn verify_report(services: &Services, id: &str) -> Result<()> {
    let resp = services.reports.verify_report(id)?;
    println!(
        "{}",
        format!("Verified. {} verifications so far.", resp.verification_count).green()
    );
    Ok(())
}

pub fn delete_report(services: &Services, id: &str) -> Result<()> {
    services.reports.delete_report(id)?;
    println!("{}", format!("Deleted report {id}.").green());
    Ok(())
}

fn print_tokens(access_token: &str, refresh_token: Option<&str>) {
    println!();
    println!("{}", "Use this token for authenticated commands:".yellow());
    println!("  export SCOUT_TOKEN={}", access_token.bright_white().bold());
    if let Some(refresh) = refresh_token {
        println!("{}", "Refresh token:".yellow());
        println!("  {}", refresh.bright_white());
    }
}

/// Log in to an existing account.
pub fn login(services: &Services, credentials: &LoginCredentials) -> Result<()> {
    let resp = services.auth.login(credentials)?;
    println!(
        "{} {}",
        "Logged in as".green().bold(),
        resp.user.username.bold()
    );
    print_tokens(&resp.access_token, Some(&resp.refresh_token));
    Ok(())
}

/// Register a new account on the server.
pub fn register(services: &Services, data: &RegisterData) -> Result<()> {
    let resp = services.auth.register(data)?;
    println!("{}", "Registration successful!".green().bold());
    print_tokens(&resp.access_token, Some(&resp.refresh_token));
    Ok(())
}

pub fn refresh(services: &Services, refresh_token: &str) -> Result<()> {
    let resp = services.auth.refresh_token(refresh_token)?;
    println!("{}", "Session refreshed.".green());
    print_tokens(&resp.access_token, None);
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("{}", profile.username.bold());
    println!("  Email:        {}", profile.email);
    println!("  Reports:      {}", profile.report_count);
    println!("  Member since: {}", profile.created_at);
}

pub fn me(services: &Services) -> Result<()> {
    let profile = services.users.get_me()?;
    print_profile(&profile);
    Ok(())
}

pub fn update_me(services: &Services, update: &UserUpdate) -> Result<()> {
    let profile = services.users.update_me(update)?;
    println!("{}", "Profile updated.".green());
    print_profile(&profile);
    Ok(())
}

pub fn show_user(services: &Services, id: &str) -> Result<()> {
    let profile = services.users.get_user(id)?;
    print_profile(&profile);
    Ok(())
}

/// Ping the server's liveness endpoint.
pub fn health(services: &Services) -> Result<()> {
    let resp = services.health.check()?;
    println!("{} {}", "Server is".green(), resp.status.bold());
    Ok(())
}

/// Use the given password or prompt for one without echo.
pub fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}
