use client::RestClient;
use dispatch::binding::{BindingPlan, ParamSlot};
use dispatch::ocm::{CommandSchema, FieldSpec};
use dispatch::{
    AfterHandler, App, CommandRegistration, ElementKind, ElementRegistration, Handler, Reply,
};
use http_gateway::{Config, Error};
use model::interaction::{
    ApplicationCommand, ApplicationCommandOption, ApplicationCommandOptionType, Interaction,
    FollowupMessage,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn echo_spec() -> ApplicationCommand {
    ApplicationCommand::new("echo", "what goes around comes around").option(
        ApplicationCommandOption::new(
            ApplicationCommandOptionType::String,
            "message",
            "This will be echoed.",
            true,
        ),
    )
}

fn guess_spec() -> ApplicationCommand {
    ApplicationCommand::new("guess", "Guess my number!")
        .option(ApplicationCommandOption::new(
            ApplicationCommandOptionType::Integer,
            "number",
            "what do you guess?",
            true,
        ))
        .option(ApplicationCommandOption::new(
            ApplicationCommandOptionType::Integer,
            "min_num",
            "smallest possible number (default: 0)",
            false,
        ))
        .option(ApplicationCommandOption::new(
            ApplicationCommandOptionType::Integer,
            "max_num",
            "biggest possible number (default: 10)",
            false,
        ))
}

fn hug_spec() -> ApplicationCommand {
    ApplicationCommand::new("hug", "Hug someone nice").option(ApplicationCommandOption::new(
        ApplicationCommandOptionType::User,
        "cutie",
        "hug this person",
        true,
    ))
}

fn generate_schema() -> CommandSchema {
    CommandSchema::new("generate", "Generate different things").field(FieldSpec::sub_command(
        "sha256",
        "Generate a SHA-256 hash",
        vec![FieldSpec::string("text", "the text to be hashed").required()],
    ))
}

fn build_app(api: Option<Arc<RestClient>>) -> App {
    let mut app = App::new();

    // callback only; this name cannot be published without a spec
    app.register_command(CommandRegistration::new(
        "ping",
        Handler::sync(|_| Ok(Some(Reply::message("pong")))),
    ));

    app.register_command(
        CommandRegistration::from_spec(
            echo_spec(),
            Handler::sync(|invocation| {
                let message = invocation
                    .values()
                    .and_then(|args| args.str("message"))
                    .unwrap_or("")
                    .to_owned();
                Ok(Some(Reply::message(message)))
            }),
        )
        .plan(BindingPlan::Options(vec![
            ParamSlot::string("message").required()
        ])),
    );

    app.register_command(
        CommandRegistration::from_spec(
            guess_spec(),
            Handler::sync(|invocation| {
                let args = invocation.values().ok_or("missing arguments")?;
                let number = args.int("number").ok_or("missing number")?;
                let min_num = args.int("min_num").unwrap_or(0);
                let max_num = args.int("max_num").unwrap_or(10);

                let span = (max_num - min_num).max(0) as u64 + 1;
                let my_number = min_num + (invocation.ctx.interaction_id().0 % span) as i64;

                let message = if my_number == number {
                    format!("My number was {}. You are correct! :tada:", my_number)
                } else {
                    format!("My number was {}. You guessed it wrong. :confused:", my_number)
                };

                Ok(Some(Reply::message(message)))
            }),
        )
        .plan(BindingPlan::Options(vec![
            ParamSlot::integer("number").required(),
            ParamSlot::integer("min_num").default(0),
            ParamSlot::integer("max_num").default(10),
        ])),
    );

    app.register_command(
        CommandRegistration::from_spec(
            hug_spec(),
            Handler::sync(|invocation| {
                let cutie = invocation
                    .values()
                    .and_then(|args| args.user("cutie"))
                    .ok_or("missing cutie")?
                    .mention();
                let author = invocation
                    .ctx
                    .invoker()
                    .and_then(|invoker| invoker.user_id())
                    .ok_or("missing invoker")?;

                Ok(Some(Reply::message(format!("<@{}> *hugs* {}", author, cutie))))
            }),
        )
        .plan(BindingPlan::Options(vec![
            ParamSlot::user("cutie").required()
        ])),
    );

    app.register_command(
        CommandRegistration::from_schema(
            generate_schema(),
            Handler::sync(|_| Ok(None)), // runs before any subcommand
        )
        .subcommand(
            CommandRegistration::new(
                "sha256",
                Handler::sync(|invocation| {
                    let text = invocation
                        .values()
                        .and_then(|args| args.str("text"))
                        .ok_or("missing text")?
                        .to_owned();

                    let digest = Sha256::digest(text.as_bytes());
                    Ok(Some(Reply::ephemeral(format!(
                        "\"{}\"\n=> `{}`",
                        text,
                        hex::encode(digest)
                    ))))
                }),
            )
            .plan(BindingPlan::Options(vec![
                ParamSlot::string("text").required()
            ])),
        )
        .fallback(Handler::sync(|_| {
            Ok(Some(Reply::ephemeral("I don't know how to generate that.")))
        })),
    );

    app.register_command(
        CommandRegistration::from_spec(
            ApplicationCommand::new("remind", "Remind you in a few seconds").option(
                ApplicationCommandOption::new(
                    ApplicationCommandOptionType::Integer,
                    "seconds",
                    "how long to wait",
                    true,
                ),
            ),
            Handler::sync(|_| Ok(Some(Reply::defer_ephemeral()))),
        )
        .plan(BindingPlan::Empty)
        .after(AfterHandler::new(|ctx| async move {
            let seconds = match ctx.interaction() {
                Interaction::ApplicationCommand(command) => command
                    .data
                    .get_option("seconds")
                    .and_then(|option| option.value.as_ref())
                    .and_then(|value| value.as_i64())
                    .unwrap_or(0),
                _ => 0,
            };

            ctx.edit_original(FollowupMessage::from_content("starting countdown"))
                .await?;
            tokio::time::sleep(Duration::from_secs(seconds as u64)).await;
            ctx.send(FollowupMessage::from_content(format!(
                "{} seconds have passed",
                seconds
            )))
            .await?;

            Ok(())
        })),
    );

    app.register_element(
        ElementKind::Component,
        ElementRegistration::new(
            "confirm",
            Handler::sync(|invocation| {
                let id = invocation
                    .values()
                    .and_then(|args| args.int("id"))
                    .ok_or("missing id")?;
                Ok(Some(Reply::message(format!("Confirmed #{}.", id))))
            }),
        )
        .plan(BindingPlan::Options(vec![ParamSlot::integer("id")])),
    );

    app.register_element(
        ElementKind::Modal,
        ElementRegistration::new(
            "feedback",
            Handler::sync(|invocation| {
                let note = invocation.ctx.input("note").unwrap_or("").to_owned();
                Ok(Some(Reply::ephemeral(format!("Thanks for the feedback: {}", note))))
            }),
        ),
    );

    if let Some(api) = api {
        app.set_api(api);
    }

    app
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_envvar();

    let api = config
        .bot_token
        .as_ref()
        .map(|token| Arc::new(RestClient::new(config.application_id, token.clone())));

    let app = build_app(api.clone());

    if api.is_some() && Config::get_envvar_or_none("PUBLISH_COMMANDS").is_some() {
        if let Err(e) = app.publish_commands(None).await {
            eprintln!("failed to publish commands: {}", e);
        }
    }

    let server = http_gateway::http::Server::new(config, app);
    server.start().await
}
