use tracing::{info, warn};

use crate::{
    directive::{
        registry::{DirectiveArgument, DirectiveDef, DirectiveResult, Flow},
        state::NestingError,
    },
    error::PreprocessError,
    interpreter::value::core::Value,
    pipeline::session::{Scope, Session},
};

pub(crate) fn if_directive(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let opened = session.location();
    if !session.is_active() {
        session.nesting.push_suppressed(opened);
        return Ok(Flow::Continue);
    }

    let condition = session.argument(def, tail, DirectiveArgument::into_expression)?;
    let condition = session.condition(&condition)?;
    session.nesting.push(condition, opened);
    Ok(Flow::Continue)
}

pub(crate) fn ifdef(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    open_on_definition(session, def, tail, true)
}

pub(crate) fn ifndef(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    open_on_definition(session, def, tail, false)
}

fn open_on_definition(session: &mut Session<'_>,
                      def: &'static DirectiveDef,
                      tail: &str,
                      wanted: bool)
                      -> DirectiveResult {
    let opened = session.location();
    if !session.is_active() {
        session.nesting.push_suppressed(opened);
        return Ok(Flow::Continue);
    }

    let name = session.argument(def, tail, DirectiveArgument::into_name)?;
    let defined = session.variables().is_defined(&name);
    session.nesting.push(defined == wanted, opened);
    Ok(Flow::Continue)
}

pub(crate) fn elif(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    require_open_frame(session)?;

    let condition = if session.nesting.wants_condition().map_err(|e| session.nesting_error(e))? {
        let expr = session.argument(def, tail, DirectiveArgument::into_expression)?;
        Some(session.condition(&expr)?)
    } else {
        None
    };

    session.nesting
           .elif(condition)
           .map_err(|e| session.nesting_error(e))?;
    Ok(Flow::Continue)
}

pub(crate) fn else_directive(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    require_open_frame(session)?;
    session.argument(def, tail, none)?;

    session.nesting
           .else_branch()
           .map_err(|e| session.nesting_error(e))?;
    Ok(Flow::Continue)
}

pub(crate) fn endif(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    require_open_frame(session)?;
    session.argument(def, tail, none)?;

    session.nesting.pop().map_err(|e| session.nesting_error(e))?;
    Ok(Flow::Continue)
}

fn require_open_frame(session: &Session<'_>) -> Result<(), PreprocessError> {
    if session.open_frames() == 0 {
        return Err(session.nesting_error(NestingError::NoOpenFrame));
    }
    Ok(())
}

pub(crate) fn define(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let (name, value) = session.argument(def, tail, DirectiveArgument::into_assignment)?;
    let value = match value {
        Some(expr) => session.evaluate(&expr)?,
        None => Value::Bool(true),
    };

    session.assign(Scope::Local, &name, value)?;
    Ok(Flow::Continue)
}

pub(crate) fn local(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    assign_required(session, def, tail, Scope::Local)
}

pub(crate) fn global(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    assign_required(session, def, tail, Scope::Global)
}

fn assign_required(session: &mut Session<'_>,
                   def: &'static DirectiveDef,
                   tail: &str,
                   scope: Scope)
                   -> DirectiveResult {
    let (name, value) = session.argument(def, tail, DirectiveArgument::into_assignment)?;
    let Some(expr) = value else {
        return Err(session.malformed(format!("#{} needs 'name = expression'", def.name)));
    };

    let value = session.evaluate(&expr)?;
    session.assign(scope, &name, value)?;
    Ok(Flow::Continue)
}

pub(crate) fn undef(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let name = session.argument(def, tail, DirectiveArgument::into_name)?;
    session.undefine(&name)?;
    Ok(Flow::Continue)
}

pub(crate) fn action(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let config = session.config;
    let Some(extension) = config.extension.as_ref() else {
        warn!(location = %session.location(), "#action ignored, no extension configured");
        return Ok(Flow::Continue);
    };

    let exprs = session.argument(def, tail, DirectiveArgument::into_expressions)?;
    let args = exprs.iter()
                    .map(|expr| session.evaluate(expr))
                    .collect::<Result<Vec<_>, _>>()?;

    if !extension.process_action(session.current_file(), &args) {
        return Err(PreprocessError::ExtensionFailure { location: session.location(),
                                                       details:  format!("action with {} argument(s) was rejected",
                                                                         args.len()), });
    }
    Ok(Flow::Continue)
}

pub(crate) fn include(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let expr = session.argument(def, tail, DirectiveArgument::into_expression)?;
    let Value::Str(target) = session.evaluate(&expr)? else {
        return Err(session.malformed("#include needs a string path"));
    };

    session.include(&target)?;
    Ok(Flow::Continue)
}

pub(crate) fn echo(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let text = message(session, def, tail)?;
    info!(location = %session.location(), "{text}");
    Ok(Flow::Continue)
}

pub(crate) fn warning(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let text = message(session, def, tail)?;
    warn!(location = %session.location(), "{text}");
    Ok(Flow::Continue)
}

pub(crate) fn error(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    let message = message(session, def, tail)?;
    Err(PreprocessError::UserError { location: session.location(),
                                     message })
}

/// Directive text with `/*$expr$*/` blocks substituted.
fn message(session: &Session<'_>, def: &'static DirectiveDef, tail: &str) -> Result<String, PreprocessError> {
    let text = session.argument(def, tail, DirectiveArgument::into_text)?;
    session.substitute(&text)
}

pub(crate) fn exit(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    session.argument(def, tail, none)?;
    Ok(Flow::ExitSource)
}

pub(crate) fn exitif(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    when_condition(session, def, tail, Flow::ExitSource)
}

pub(crate) fn excludeif(session: &mut Session<'_>, def: &'static DirectiveDef, tail: &str) -> DirectiveResult {
    when_condition(session, def, tail, Flow::ExcludeFile)
}

fn when_condition(session: &Session<'_>, def: &'static DirectiveDef, tail: &str, flow: Flow) -> DirectiveResult {
    let expr = session.argument(def, tail, DirectiveArgument::into_expression)?;
    Ok(if session.condition(&expr)? { flow } else { Flow::Continue })
}

fn none(argument: DirectiveArgument) -> Option<()> {
    matches!(argument, DirectiveArgument::None).then_some(())
}
