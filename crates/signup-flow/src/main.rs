//! Interactive signup client - entry point.

use account_client::AccountClient;
use anyhow::Context;
use otp_client::OtpClient;
use signup_flow::{
    Config, FlowOptions, Phase, RegistrationForm, Severity, SignupFlow, StatusMessage,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> signup_flow::AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.flow.log_level);

    info!("Starting signup flow");

    // Initialize collaborator clients
    let otp = OtpClient::new(&config.otp.service_url).context("Failed to create OTP client")?;
    let accounts = AccountClient::new(&config.account.service_url)
        .context("Failed to create account client")?;

    // Health checks - warn but let the flow surface per-call errors
    if otp.health_check().await {
        info!("OTP service healthy at {}", config.otp.service_url);
    } else {
        warn!("OTP service not reachable at {}", config.otp.service_url);
    }
    if accounts.health_check().await {
        info!("Account service healthy at {}", config.account.service_url);
    } else {
        warn!(
            "Account service not reachable at {}",
            config.account.service_url
        );
    }

    let mut flow = SignupFlow::new(
        otp,
        accounts,
        FlowOptions {
            resend_cooldown: config.flow.resend_cooldown,
            verified_ttl: config.flow.verified_ttl,
            locale: config.flow.locale.clone(),
            callback_url: config.flow.callback_url.clone(),
        },
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Form step: collect fields until issuance succeeds. Abandoning the
    // process here simply drops the flow and the held fields.
    while flow.phase() == Phase::Form {
        let form = read_form(&mut lines).await?;
        flow.submit_form(form).await;
        print_status(flow.status());

        // Issuance failed with the fields retained: offer a resubmit
        // without re-typing.
        while flow.phase() == Phase::Form && flow.pending().is_some() {
            println!("Press enter to retry sending the code, or type 'edit' to re-enter the form.");
            let line = read_line(&mut lines).await?;
            if line.trim().eq_ignore_ascii_case("edit") {
                break;
            }
            flow.resubmit().await;
            print_status(flow.status());
        }
    }

    // Code step: enter the 6-digit code, or 'resend' / 'retry'.
    while flow.phase() == Phase::AwaitingCode {
        match flow.resend_remaining() {
            Some(left) => println!("Enter the code (resend available in {}s):", left.as_secs()),
            None => println!("Enter the code, or type 'resend' to request a new one:"),
        }

        let line = read_line(&mut lines).await?;
        let input = line.trim();

        if input.eq_ignore_ascii_case("resend") {
            if flow.can_resend() {
                flow.resend().await;
            } else {
                println!("Resend is not available yet.");
                continue;
            }
        } else if input.eq_ignore_ascii_case("retry") {
            flow.retry_create().await;
        } else {
            flow.set_code_input(input);
            flow.verify().await;
        }

        print_status(flow.status());

        if flow.can_retry_create() {
            println!("Type 'retry' to try creating the account again.");
        }
    }

    // Complete: pause, then hand off to the login page.
    if let Some(target) = flow.redirect_target() {
        tokio::time::sleep(config.flow.redirect_delay).await;
        println!("Continue at: {}", target);
    }

    info!("Signup flow finished");
    Ok(())
}

/// Prompt for the six registration fields.
async fn read_form(lines: &mut Lines<BufReader<Stdin>>) -> signup_flow::AppResult<RegistrationForm> {
    println!("First name:");
    let first_name = read_line(lines).await?;
    println!("Last name:");
    let last_name = read_line(lines).await?;
    println!("Email:");
    let email = read_line(lines).await?;
    println!("Password:");
    let password = read_line(lines).await?;
    println!("Confirm password:");
    let confirm_password = read_line(lines).await?;
    println!("Mobile number (09...):");
    let phone = read_line(lines).await?;

    Ok(RegistrationForm {
        first_name,
        last_name,
        email,
        password,
        confirm_password,
        phone,
    })
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> signup_flow::AppResult<String> {
    Ok(lines.next_line().await?.unwrap_or_default())
}

fn print_status(status: Option<&StatusMessage>) {
    if let Some(message) = status {
        let tag = match message.severity {
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Success => "ok",
        };
        println!("[{}] {}", tag, message.text);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
