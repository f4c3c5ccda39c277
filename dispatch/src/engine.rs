use crate::after;
use crate::app::App;
use crate::binding::{self, BindError, BindingPlan};
use crate::context::{AfterContext, Context};
use crate::error::DispatchError;
use crate::handler::{Arguments, HandlerResult, Invocation, Reply};
use crate::ocm;
use crate::registry::{CommandRegistration, ElementKind, ElementRegistration};
use model::interaction::{
    ApplicationCommandInteraction, ApplicationCommandInteractionDataOption,
    ApplicationCommandInteractionDataResolved, Interaction,
    InteractionApplicationCommandCallbackData, InteractionResponse,
};
use std::sync::Arc;

pub(crate) async fn handle(
    app: &App,
    interaction: Interaction,
) -> Result<Option<InteractionResponse>, DispatchError> {
    let interaction = Arc::new(interaction);

    match &*interaction {
        Interaction::Ping(_) => {
            tracing::debug!("incoming ping interaction");
            Ok(Some(InteractionResponse::new_pong()))
        }
        Interaction::ApplicationCommand(command) => {
            handle_command(app, interaction.clone(), command)
                .await
                .map(Some)
        }
        Interaction::MessageComponent(component) => {
            let custom_id = component.data.custom_id.clone();
            handle_element(app, interaction.clone(), ElementKind::Component, &custom_id).await
        }
        Interaction::ModalSubmit(modal) => {
            let custom_id = modal.data.custom_id.clone();
            handle_element(app, interaction.clone(), ElementKind::Modal, &custom_id).await
        }
        Interaction::ApplicationCommandAutoComplete(_) => {
            tracing::debug!("autocomplete interactions are unsupported; producing no response");
            Ok(None)
        }
    }
}

async fn handle_command(
    app: &App,
    interaction: Arc<Interaction>,
    command: &ApplicationCommandInteraction,
) -> Result<InteractionResponse, DispatchError> {
    let name = &*command.data.name;
    tracing::debug!("incoming application command interaction \"{}\"", name);

    let registration = app
        .commands
        .get(name)
        .ok_or_else(|| DispatchError::UnknownCommand(Box::from(name)))?;

    let resolved = &command.data.resolved;
    let mut ctx = Context::new(interaction.clone(), vec![registration.name.clone()]);
    let mut chain: Vec<&CommandRegistration> = vec![registration];
    let mut current = registration;
    let mut scope: &[ApplicationCommandInteractionDataOption] = &command.data.options;

    let mut reply = invoke_node(app, current, &chain, &ctx, scope, resolved, &interaction).await?;

    // descend while the response is unresolved and the payload names a
    // subcommand level
    while reply.is_none() {
        let branch = match single_sub_command(scope) {
            Some(branch) => branch,
            None => break,
        };

        match current.children.get(&*branch.name) {
            Some(child) => {
                tracing::debug!("handling subcommand \"{}\"", branch.name);
                chain.push(child);
                current = child;
                ctx.push_path(branch.name.clone());
                scope = &branch.options;
                reply =
                    invoke_node(app, current, &chain, &ctx, scope, resolved, &interaction).await?;
            }
            None => {
                let fallback = chain
                    .iter()
                    .rev()
                    .find_map(|node| node.fallback_handler.clone());

                match fallback {
                    Some(fallback) => {
                        tracing::debug!(
                            "no registration for subcommand \"{}\"; invoking fallback",
                            branch.name
                        );
                        let invocation = Invocation {
                            ctx: ctx.clone(),
                            args: Arguments::Empty,
                        };
                        reply = settle(fallback.invoke(invocation).await, &chain, app)?;
                    }
                    None => tracing::debug!(
                        "no registration or fallback for subcommand \"{}\"",
                        branch.name
                    ),
                }
                break;
            }
        }
    }

    let response = normalize_message_reply(reply);

    // the most specific after-hook along the matched chain fires; nothing else
    if let Some(after_handler) = chain.iter().rev().find_map(|node| node.after_handler.clone()) {
        after::spawn(
            after_handler,
            AfterContext::new(interaction, response.clone(), app.api.clone()),
        );
    }

    Ok(response)
}

async fn invoke_node(
    app: &App,
    registration: &CommandRegistration,
    chain: &[&CommandRegistration],
    ctx: &Context,
    scope: &[ApplicationCommandInteractionDataOption],
    resolved: &ApplicationCommandInteractionDataResolved,
    interaction: &Arc<Interaction>,
) -> Result<Option<Reply>, DispatchError> {
    let args = match &registration.plan {
        BindingPlan::Empty => Arguments::Empty,
        BindingPlan::Interaction => Arguments::Interaction(interaction.clone()),
        BindingPlan::Options(slots) => {
            Arguments::Values(binding::bind_options(slots, scope, resolved)?)
        }
        BindingPlan::Model(schema) => Arguments::Model(ocm::bind(schema, scope, resolved)?),
    };

    let invocation = Invocation {
        ctx: ctx.clone(),
        args,
    };

    settle(registration.handler.invoke(invocation).await, chain, app)
}

/// Resolve a handler result through the error-handler chain: the failing
/// node's own handler first, then each ancestor walking up, then the global
/// handler; unabsorbed errors surface at the `handle()` boundary.
fn settle(
    result: HandlerResult,
    chain: &[&CommandRegistration],
    app: &App,
) -> Result<Option<Reply>, DispatchError> {
    let error = match result {
        Ok(reply) => return Ok(reply),
        Err(error) => error,
    };

    for node in chain.iter().rev() {
        if let Some(handler) = &node.error_handler {
            tracing::debug!("handler error absorbed by \"{}\": {}", node.name, error);
            return Ok(handler.handle(error.as_ref()));
        }
    }

    if let Some(handler) = &app.error_handler {
        tracing::debug!("handler error absorbed by the global handler: {}", error);
        return Ok(handler.handle(error.as_ref()));
    }

    Err(DispatchError::Handler(error))
}

fn single_sub_command(
    scope: &[ApplicationCommandInteractionDataOption],
) -> Option<&ApplicationCommandInteractionDataOption> {
    match scope {
        [only] if only.is_sub_command() => Some(only),
        _ => None,
    }
}

async fn handle_element(
    app: &App,
    interaction: Arc<Interaction>,
    kind: ElementKind,
    custom_id: &str,
) -> Result<Option<InteractionResponse>, DispatchError> {
    tracing::debug!("incoming {:?} interaction \"{}\"", kind, custom_id);

    let mut segments = custom_id.split(':');
    let prefix = segments.next().unwrap_or("");

    let registration = match app.elements(kind).get(prefix) {
        Some(registration) => registration,
        None => {
            // stale ids from a previous deployment are an expected condition
            tracing::debug!("no {:?} registered for custom id prefix \"{}\"", kind, prefix);
            return Ok(None);
        }
    };

    let suffix: Vec<&str> = segments.collect();
    let args = match &registration.plan {
        BindingPlan::Empty => Arguments::Empty,
        BindingPlan::Interaction => Arguments::Interaction(interaction.clone()),
        BindingPlan::Options(slots) => {
            Arguments::Values(binding::bind_custom_id_args(slots, &suffix)?)
        }
        BindingPlan::Model(_) => return Err(BindError::ModelOnElement.into()),
    };

    let invocation = Invocation {
        ctx: Context::new(interaction.clone(), Vec::new()),
        args,
    };

    let result = registration.handler.invoke(invocation).await;
    let reply = settle_element(result, registration, app)?;

    let response = match kind {
        ElementKind::Component => normalize_component_reply(reply),
        ElementKind::Modal => normalize_message_reply(reply),
    };

    if let Some(after_handler) = registration.after_handler.clone() {
        after::spawn(
            after_handler,
            AfterContext::new(interaction, response.clone(), app.api.clone()),
        );
    }

    Ok(Some(response))
}

fn settle_element(
    result: HandlerResult,
    registration: &ElementRegistration,
    app: &App,
) -> Result<Option<Reply>, DispatchError> {
    let error = match result {
        Ok(reply) => return Ok(reply),
        Err(error) => error,
    };

    if let Some(handler) = &registration.error_handler {
        tracing::debug!(
            "element error absorbed by \"{}\": {}",
            registration.custom_id,
            error
        );
        return Ok(handler.handle(error.as_ref()));
    }

    if let Some(handler) = &app.error_handler {
        tracing::debug!("element error absorbed by the global handler: {}", error);
        return Ok(handler.handle(error.as_ref()));
    }

    Err(DispatchError::Handler(error))
}

/// Commands and modals reply into the channel: an unresolved response defers,
/// content becomes a source message.
fn normalize_message_reply(reply: Option<Reply>) -> InteractionResponse {
    match reply {
        None => InteractionResponse::new_deferred_channel_message_with_source(false),
        Some(Reply::Defer { ephemeral }) => {
            InteractionResponse::new_deferred_channel_message_with_source(ephemeral)
        }
        Some(Reply::Message { content, ephemeral }) => {
            let mut data = InteractionApplicationCommandCallbackData::from_content(content);
            if ephemeral {
                data = data.ephemeral();
            }
            InteractionResponse::new_channel_message_with_source(data)
        }
        Some(Reply::Response(response)) => response,
    }
}

/// Components reply onto their own message: an unresolved response defers the
/// update, content rewrites the message.
fn normalize_component_reply(reply: Option<Reply>) -> InteractionResponse {
    match reply {
        None | Some(Reply::Defer { .. }) => InteractionResponse::new_deferred_message_update(),
        Some(Reply::Message { content, ephemeral }) => {
            let mut data = InteractionApplicationCommandCallbackData::from_content(content);
            if ephemeral {
                data = data.ephemeral();
            }
            InteractionResponse::new_update_message(data)
        }
        Some(Reply::Response(response)) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::binding::ParamSlot;
    use crate::handler::{AfterHandler, ErrorHandler, Handler};
    use crate::ocm::{CommandSchema, FieldSpec};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn member_json() -> serde_json::Value {
        json!({
            "user": {"id": "987654321", "username": "test-user", "discriminator": "1234"},
            "nick": null,
            "roles": [],
            "joined_at": "2021-01-04T23:38:01.370760Z",
            "deaf": false,
            "mute": false
        })
    }

    fn command_interaction(name: &str, options: serde_json::Value) -> Interaction {
        serde_json::from_value(json!({
            "id": "11111",
            "application_id": "55555",
            "type": 2,
            "data": {"id": "44444", "name": name, "options": options},
            "guild_id": "22222",
            "channel_id": "33333",
            "member": member_json(),
            "token": "abc",
            "version": 1
        }))
        .unwrap()
    }

    fn component_interaction(custom_id: &str) -> Interaction {
        serde_json::from_value(json!({
            "id": "11111",
            "application_id": "55555",
            "type": 3,
            "message": {"id": "1", "channel_id": "33333"},
            "data": {"custom_id": custom_id, "component_type": 2},
            "guild_id": "22222",
            "channel_id": "33333",
            "member": member_json(),
            "token": "abc"
        }))
        .unwrap()
    }

    fn modal_interaction(custom_id: &str, input_id: &str, value: &str) -> Interaction {
        serde_json::from_value(json!({
            "id": "11111",
            "application_id": "55555",
            "type": 5,
            "data": {
                "custom_id": custom_id,
                "components": [{
                    "type": 1,
                    "components": [{"type": 4, "custom_id": input_id, "value": value}]
                }]
            },
            "guild_id": "22222",
            "channel_id": "33333",
            "member": member_json(),
            "token": "abc"
        }))
        .unwrap()
    }

    fn wire(response: &InteractionResponse) -> serde_json::Value {
        response.to_wire().unwrap()
    }

    #[tokio::test]
    async fn test_ping_invokes_no_handlers() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = invoked.clone();

        let mut app = App::new();
        app.register_command(CommandRegistration::new(
            "echo",
            Handler::sync(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Some(Reply::message("hi")))
            }),
        ));

        let ping = serde_json::from_value(json!({"id": "1", "application_id": "2", "type": 1}))
            .unwrap();
        let response = app.handle(ping).await.unwrap().unwrap();

        assert_eq!(wire(&response), json!({"type": 1}));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_echo_binds_named_option() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new(
                "echo",
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

        let interaction = command_interaction(
            "echo",
            json!([{"name": "message", "type": 3, "value": "hi"}]),
        );
        let response = app.handle(interaction).await.unwrap().unwrap();

        assert_eq!(wire(&response), json!({"type": 4, "data": {"content": "hi"}}));
    }

    #[tokio::test]
    async fn test_guess_fills_declared_defaults() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new(
                "guess",
                Handler::sync(|invocation| {
                    let args = invocation.values().expect("values plan");
                    let content = format!(
                        "guessed {} between {} and {}",
                        args.int("number").expect("number"),
                        args.int("min_num").expect("min_num"),
                        args.int("max_num").expect("max_num"),
                    );
                    Ok(Some(Reply::message(content)))
                }),
            )
            .plan(BindingPlan::Options(vec![
                ParamSlot::integer("number").required(),
                ParamSlot::integer("min_num").default(0),
                ParamSlot::integer("max_num").default(10),
            ])),
        );

        let interaction = command_interaction(
            "guess",
            json!([{"name": "number", "type": 4, "value": 7}]),
        );
        let response = app.handle(interaction).await.unwrap().unwrap();

        assert_eq!(
            wire(&response)["data"]["content"],
            json!("guessed 7 between 0 and 10")
        );

        let interaction = command_interaction(
            "guess",
            json!([
                {"name": "number", "type": 4, "value": 42},
                {"name": "max_num", "type": 4, "value": 69}
            ]),
        );
        let response = app.handle(interaction).await.unwrap().unwrap();

        assert_eq!(
            wire(&response)["data"]["content"],
            json!("guessed 42 between 0 and 69")
        );
    }

    fn fold_digest(text: &str) -> String {
        let digest = text
            .bytes()
            .fold(0u64, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u64));
        format!("{:016x}", digest)
    }

    fn generate_payload() -> Interaction {
        command_interaction(
            "generate",
            json!([{
                "name": "sha1",
                "type": 1,
                "options": [{"name": "text", "type": 3, "value": "hello world"}]
            }]),
        )
    }

    #[tokio::test]
    async fn test_sub_command_recursion() {
        let parent_calls = Arc::new(AtomicUsize::new(0));
        let counter = parent_calls.clone();

        let mut app = App::new();
        app.register_command(
            CommandRegistration::new(
                "generate",
                Handler::sync(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }),
            )
            .subcommand(
                CommandRegistration::new(
                    "sha1",
                    Handler::sync(|invocation| {
                        let text = invocation
                            .values()
                            .and_then(|args| args.str("text"))
                            .unwrap_or("")
                            .to_owned();
                        Ok(Some(Reply::message(format!(
                            "\"{}\"\n=> `{}`",
                            text,
                            fold_digest(&text)
                        ))))
                    }),
                )
                .plan(BindingPlan::Options(vec![
                    ParamSlot::string("text").required()
                ])),
            ),
        );

        let response = app.handle(generate_payload()).await.unwrap().unwrap();

        assert_eq!(parent_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            wire(&response)["data"]["content"],
            json!(format!("\"hello world\"\n=> `{}`", fold_digest("hello world")))
        );
    }

    #[tokio::test]
    async fn test_unregistered_sub_command_invokes_fallback() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new("generate", Handler::sync(|_| Ok(None)))
                .fallback(Handler::sync(|_| {
                    Ok(Some(Reply::message("unknown algorithm")))
                })),
        );

        let response = app.handle(generate_payload()).await.unwrap().unwrap();

        assert_eq!(
            wire(&response)["data"]["content"],
            json!("unknown algorithm")
        );
    }

    #[tokio::test]
    async fn test_unresolved_sub_command_defers() {
        let mut app = App::new();
        app.register_command(CommandRegistration::new("generate", Handler::sync(|_| Ok(None))));

        let response = app.handle(generate_payload()).await.unwrap().unwrap();

        assert_eq!(wire(&response), json!({"type": 5}));
    }

    #[tokio::test]
    async fn test_two_level_sub_command_group() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new("generate", Handler::sync(|_| Ok(None))).subcommand(
                CommandRegistration::new("hmac", Handler::sync(|_| Ok(None))).subcommand(
                    CommandRegistration::new(
                        "sha256",
                        Handler::sync(|invocation| {
                            let ctx_path: Vec<&str> = invocation
                                .ctx
                                .command_path()
                                .iter()
                                .map(|s| &**s)
                                .collect();
                            assert_eq!(ctx_path, ["generate", "hmac", "sha256"]);
                            Ok(Some(Reply::message("digest")))
                        }),
                    ),
                ),
            ),
        );

        let interaction = command_interaction(
            "generate",
            json!([{
                "name": "hmac",
                "type": 2,
                "options": [{
                    "name": "sha256",
                    "type": 1,
                    "options": [{"name": "text", "type": 3, "value": "x"}]
                }]
            }]),
        );
        let response = app.handle(interaction).await.unwrap().unwrap();

        assert_eq!(wire(&response)["data"]["content"], json!("digest"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_a_routing_error() {
        let app = App::new();

        let result = app
            .handle(command_interaction("missing", json!([])))
            .await;

        assert!(matches!(result, Err(DispatchError::UnknownCommand(name)) if &*name == "missing"));
    }

    #[tokio::test]
    async fn test_error_absorbed_by_node_handler() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new("boom", Handler::sync(|_| Err("exploded".into())))
                .on_error(ErrorHandler::new(|error| {
                    Some(Reply::message(format!("caught: {}", error)))
                })),
        );

        let response = app
            .handle(command_interaction("boom", json!([])))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wire(&response)["data"]["content"], json!("caught: exploded"));
    }

    #[tokio::test]
    async fn test_sub_command_error_walks_up_to_ancestor() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new("generate", Handler::sync(|_| Ok(None)))
                .on_error(ErrorHandler::new(|error| {
                    Some(Reply::message(format!("parent caught: {}", error)))
                }))
                .subcommand(CommandRegistration::new(
                    "sha1",
                    Handler::sync(|_| Err("bad digest".into())),
                )),
        );

        let response = app.handle(generate_payload()).await.unwrap().unwrap();

        assert_eq!(
            wire(&response)["data"]["content"],
            json!("parent caught: bad digest")
        );
    }

    #[tokio::test]
    async fn test_error_falls_back_to_global_handler() {
        let mut app = App::new();
        app.register_command(CommandRegistration::new(
            "boom",
            Handler::sync(|_| Err("exploded".into())),
        ));
        app.on_error(ErrorHandler::new(|error| {
            Some(Reply::ephemeral(format!("something went wrong: {}", error)))
        }));

        let response = app
            .handle(command_interaction("boom", json!([])))
            .await
            .unwrap()
            .unwrap();

        let wire = wire(&response);
        assert_eq!(wire["data"]["content"], json!("something went wrong: exploded"));
        assert_eq!(wire["data"]["flags"], json!(64));
    }

    #[tokio::test]
    async fn test_unabsorbed_error_reaches_the_boundary() {
        let mut app = App::new();
        app.register_command(CommandRegistration::new(
            "boom",
            Handler::sync(|_| Err("exploded".into())),
        ));

        let result = app.handle(command_interaction("boom", json!([]))).await;

        assert!(matches!(result, Err(DispatchError::Handler(_))));
    }

    #[tokio::test]
    async fn test_unmatched_component_is_a_no_op() {
        let app = App::new();

        let result = app.handle(component_interaction("stale:1")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unmatched_modal_is_a_no_op() {
        let app = App::new();

        let result = app
            .handle(modal_interaction("stale", "note", "x"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_component_custom_id_argument_coercion() {
        let mut app = App::new();
        app.register_element(
            ElementKind::Component,
            ElementRegistration::new(
                "confirm",
                Handler::sync(|invocation| {
                    let id = invocation
                        .values()
                        .and_then(|args| args.int("id"))
                        .expect("id argument");
                    Ok(Some(Reply::message(format!("confirmed {}", id))))
                }),
            )
            .plan(BindingPlan::Options(vec![ParamSlot::integer("id")])),
        );

        let response = app
            .handle(component_interaction("confirm:42"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            wire(&response),
            json!({"type": 7, "data": {"content": "confirmed 42"}})
        );
    }

    #[tokio::test]
    async fn test_component_without_reply_defers_the_update() {
        let mut app = App::new();
        app.register_element(
            ElementKind::Component,
            ElementRegistration::new("ack", Handler::sync(|_| Ok(None))),
        );

        let response = app
            .handle(component_interaction("ack"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wire(&response), json!({"type": 6}));
    }

    #[tokio::test]
    async fn test_component_and_modal_share_a_custom_id() {
        let mut app = App::new();
        app.register_element(
            ElementKind::Component,
            ElementRegistration::new("feedback", Handler::sync(|_| Ok(Some(Reply::message("clicked"))))),
        );
        app.register_element(
            ElementKind::Modal,
            ElementRegistration::new(
                "feedback",
                Handler::sync(|invocation| {
                    let note = invocation.ctx.input("note").unwrap_or("").to_owned();
                    Ok(Some(Reply::message(format!("received: {}", note))))
                }),
            ),
        );

        let response = app
            .handle(modal_interaction("feedback", "note", "great"))
            .await
            .unwrap()
            .unwrap();

        // modals reply into the channel, not onto a message
        assert_eq!(
            wire(&response),
            json!({"type": 4, "data": {"content": "received: great"}})
        );

        let response = app
            .handle(component_interaction("feedback"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            wire(&response),
            json!({"type": 7, "data": {"content": "clicked"}})
        );
    }

    #[tokio::test]
    async fn test_autocomplete_is_unsupported() {
        let app = App::new();

        let interaction = serde_json::from_value(json!({
            "id": "11111",
            "application_id": "55555",
            "type": 4,
            "data": {"id": "44444", "name": "echo", "options": [], "type": 1},
            "guild_id": "22222",
            "channel_id": "33333",
            "member": member_json(),
            "token": "abc"
        }))
        .unwrap();

        assert!(app.handle(interaction).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_later_registration_shadows_earlier() {
        let mut app = App::new();
        app.register_command(CommandRegistration::new(
            "echo",
            Handler::sync(|_| Ok(Some(Reply::message("first")))),
        ));
        app.register_command(CommandRegistration::new(
            "echo",
            Handler::sync(|_| Ok(Some(Reply::message("second")))),
        ));

        let response = app
            .handle(command_interaction("echo", json!([])))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wire(&response)["data"]["content"], json!("second"));
    }

    #[tokio::test]
    async fn test_interaction_plan_passes_the_raw_interaction() {
        let mut app = App::new();
        app.register_command(
            CommandRegistration::new(
                "inspect",
                Handler::sync(|invocation| {
                    let name = match &invocation.args {
                        Arguments::Interaction(interaction) => match &**interaction {
                            Interaction::ApplicationCommand(command) => command.data.name.clone(),
                            other => panic!("unexpected interaction: {:?}", other),
                        },
                        other => panic!("unexpected arguments: {:?}", other),
                    };
                    Ok(Some(Reply::message(format!("saw {}", name))))
                }),
            )
            .plan(BindingPlan::Interaction),
        );

        let response = app
            .handle(command_interaction("inspect", json!([])))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wire(&response)["data"]["content"], json!("saw inspect"));
    }

    #[tokio::test]
    async fn test_declarative_plan_binds_the_schema() {
        let schema = CommandSchema::new("generate", "Generate a digest").field(
            FieldSpec::sub_command(
                "sha1",
                "SHA-1",
                vec![FieldSpec::string("text", "Text to hash").required()],
            ),
        );
        let sub_schema = CommandSchema::new("sha1", "SHA-1")
            .field(FieldSpec::string("text", "Text to hash").required());

        let mut app = App::new();
        app.register_command(
            CommandRegistration::from_schema(
                schema,
                Handler::sync(|invocation| {
                    let model = invocation.model().expect("model plan");
                    let (name, _) = model.subcommand().expect("matched branch");
                    assert_eq!(name, "sha1");
                    Ok(None)
                }),
            )
            .subcommand(
                CommandRegistration::new(
                    "sha1",
                    Handler::sync(|invocation| {
                        let model = invocation.model().expect("model plan");
                        Ok(Some(Reply::message(model.str("text").unwrap_or("").to_owned())))
                    }),
                )
                .plan(BindingPlan::Model(Arc::new(sub_schema))),
            ),
        );

        let response = app.handle(generate_payload()).await.unwrap().unwrap();

        assert_eq!(wire(&response)["data"]["content"], json!("hello world"));
    }

    #[tokio::test]
    async fn test_most_specific_after_hook_fires() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<&'static str>();
        let parent_tx = tx.clone();

        let mut app = App::new();
        app.register_command(
            CommandRegistration::new("generate", Handler::sync(|_| Ok(None)))
                .after(AfterHandler::new(move |_| {
                    let tx = parent_tx.clone();
                    async move {
                        tx.send("parent").ok();
                        Ok(())
                    }
                }))
                .subcommand(
                    CommandRegistration::new(
                        "sha1",
                        Handler::sync(|_| Ok(Some(Reply::message("done")))),
                    )
                    .after(AfterHandler::new(move |ctx| {
                        let tx = tx.clone();
                        async move {
                            assert!(matches!(
                                ctx.response(),
                                InteractionResponse::ChannelMessageWithSource(_)
                            ));
                            tx.send("sub").ok();
                            Ok(())
                        }
                    })),
                ),
        );

        app.handle(generate_payload()).await.unwrap();

        let fired = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("after hook did not run");
        assert_eq!(fired, Some("sub"));

        // nothing else fires
        assert!(
            tokio::time::timeout(Duration::from_millis(50), rx.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_after_hook_failure_is_swallowed() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<&'static str>();

        let mut app = App::new();
        app.register_element(
            ElementKind::Component,
            ElementRegistration::new("ack", Handler::sync(|_| Ok(None))).after(AfterHandler::new(
                move |_| {
                    let tx = tx.clone();
                    async move {
                        tx.send("ran").ok();
                        Err("followup failed".into())
                    }
                },
            )),
        );

        let response = app.handle(component_interaction("ack")).await.unwrap();
        assert!(response.is_some());

        let fired = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("after hook did not run");
        assert_eq!(fired, Some("ran"));
    }

    #[tokio::test]
    async fn test_ephemeral_reply_sets_the_flag() {
        let mut app = App::new();
        app.register_command(CommandRegistration::new(
            "whisper",
            Handler::sync(|_| Ok(Some(Reply::ephemeral("only you can see this")))),
        ));

        let response = app
            .handle(command_interaction("whisper", json!([])))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            wire(&response),
            json!({
                "type": 4,
                "data": {"content": "only you can see this", "flags": 64}
            })
        );
    }
}
