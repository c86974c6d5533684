//! Interactive screen loop: each navigation hop enters a fresh visit, reads
//! commands until the visit exits, and dispatches the outbound message.

use std::io::{BufRead, Write};

use anyhow::Result;
use menu_core::{IdGenerator, MenuCollection};
use screen_bridge::{
    sign_in, Confirmation, ExitAction, Navigator, NoticeContext, ScreenVisit, UserNotice,
};
use shared::{
    error::MenuError,
    protocol::{OutboundMessage, ScreenParams, ScreenRoute},
};
use tracing::{debug, info, warn};

use crate::{
    commands::{course_from_input, parse_command, Destination, ScreenCommand},
    config::Settings,
    render,
};

enum Step {
    Stay { rerender: bool },
    Exit(ExitAction),
    Quit,
}

pub struct Session<R, W> {
    settings: Settings,
    navigator: Navigator,
    ids: Box<dyn IdGenerator>,
    carried: Option<MenuCollection>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        let ids = settings.id_strategy.generator();
        Self {
            settings,
            navigator: Navigator::new(),
            ids,
            carried: None,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!("menu session started");
        self.navigator.dispatch(OutboundMessage::entry())?;

        while let Some(message) = self.navigator.next()? {
            let outbound = if message.destination == ScreenRoute::Login {
                self.login_screen(&message.params)?
            } else {
                self.screen(message)?
            };
            match outbound {
                Some(outbound) => self.navigator.dispatch(outbound)?,
                None => break,
            }
        }

        info!("menu session ended");
        Ok(())
    }

    fn login_screen(&mut self, params: &ScreenParams) -> Result<Option<OutboundMessage>> {
        write!(self.output, "{}", render::login(&self.settings.default_role))?;
        loop {
            let Some(line) = self.prompt("login> ")? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                return Ok(Some(sign_in(params, &self.settings.default_role)));
            }
            match parse_command(&line) {
                Ok(ScreenCommand::Login { role_flag }) => {
                    return Ok(Some(sign_in(params, &role_flag)));
                }
                Ok(ScreenCommand::Quit) => return Ok(None),
                Ok(_) => writeln!(self.output, "Log in first: 'login chef' or 'login user'.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn screen(&mut self, message: OutboundMessage) -> Result<Option<OutboundMessage>> {
        let mut visit = ScreenVisit::resume(&message, self.carried.take());
        let mut rerender = true;

        loop {
            if visit.observe_side_channel() {
                rerender = true;
            }
            if rerender {
                let view = self.view(&visit);
                write!(self.output, "\n{view}")?;
            }

            let Some(line) = self.prompt(&format!("{}> ", visit.route()))? else {
                return Ok(None);
            };
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    rerender = false;
                    continue;
                }
            };

            match self.handle(&mut visit, command)? {
                Step::Stay { rerender: again } => rerender = again,
                Step::Exit(action) => {
                    let (outbound, carried) = visit.hand_off(action);
                    self.carried = carried;
                    return Ok(Some(outbound));
                }
                Step::Quit => return Ok(None),
            }
        }
    }

    fn view(&self, visit: &ScreenVisit) -> String {
        let currency = &self.settings.currency_symbol;
        match visit.route() {
            ScreenRoute::Home | ScreenRoute::Login => {
                render::home(visit.working(), visit.role(), currency)
            }
            ScreenRoute::AddDish => render::add_form(),
            ScreenRoute::RemoveDish => render::removal_list(visit.working(), currency),
            ScreenRoute::Filter => render::filtered(visit.working(), None, currency),
            ScreenRoute::Help => render::help(visit.role()),
        }
    }

    fn handle(&mut self, visit: &mut ScreenVisit, command: ScreenCommand) -> Result<Step> {
        let route = visit.route();
        debug!(screen = %route, ?command, "screen command");

        let step = match (route, command) {
            (_, ScreenCommand::Quit) => Step::Quit,
            (_, ScreenCommand::List) => Step::Stay { rerender: true },

            (ScreenRoute::Home, ScreenCommand::Open(destination)) => {
                let target = match destination {
                    Destination::AddDish => ScreenRoute::AddDish,
                    Destination::RemoveDish => ScreenRoute::RemoveDish,
                    Destination::Filter => ScreenRoute::Filter,
                    Destination::Help => ScreenRoute::Help,
                };
                let editing = matches!(target, ScreenRoute::AddDish | ScreenRoute::RemoveDish);
                if editing && !visit.role().can_edit() {
                    let err = MenuError::Forbidden {
                        action: "edit the menu",
                    };
                    self.report(NoticeContext::Navigation, &err)?;
                    Step::Stay { rerender: false }
                } else {
                    Step::Exit(ExitAction::Confirm(target))
                }
            }
            (ScreenRoute::Home, ScreenCommand::Reset) => {
                let decision = if visit.role().can_edit() {
                    self.confirm("Are you sure you want to clear all dishes?")?
                } else {
                    Confirmation::Cancelled
                };
                match visit.reset_menu(decision) {
                    Ok(cleared) => Step::Stay { rerender: cleared },
                    Err(err) => {
                        self.report(NoticeContext::ResetMenu, &err)?;
                        Step::Stay { rerender: false }
                    }
                }
            }
            (ScreenRoute::Home, ScreenCommand::Logout) => Step::Exit(ExitAction::Logout),

            (ScreenRoute::AddDish, ScreenCommand::Add(input)) => {
                match visit.add_dish(&input, self.ids.as_mut()) {
                    Ok(record) => {
                        self.notice(UserNotice::info(
                            NoticeContext::AddDish,
                            "Dish added successfully!",
                        ))?;
                        debug!(dish_id = %record.id, "returning to home with added dish");
                        Step::Exit(ExitAction::Confirm(ScreenRoute::Home))
                    }
                    Err(err) => {
                        self.report(NoticeContext::AddDish, &err)?;
                        Step::Stay { rerender: false }
                    }
                }
            }
            (ScreenRoute::AddDish, ScreenCommand::Back | ScreenCommand::Cancel) => {
                Step::Exit(ExitAction::Cancel(ScreenRoute::Home))
            }

            (ScreenRoute::RemoveDish, ScreenCommand::Remove { id }) => {
                let Some(name) = visit.working().get(&id).map(|dish| dish.name.clone()) else {
                    writeln!(self.output, "No dish with id '{id}'.")?;
                    return Ok(Step::Stay { rerender: false });
                };
                let decision = self.confirm(&format!("Remove '{name}' from the menu?"))?;
                match visit.remove_dish(&id, decision) {
                    Ok(removed) => Step::Stay { rerender: removed },
                    Err(err) => {
                        self.report(NoticeContext::RemoveDish, &err)?;
                        Step::Stay { rerender: false }
                    }
                }
            }
            (ScreenRoute::RemoveDish, ScreenCommand::Back) => {
                Step::Exit(ExitAction::Back(ScreenRoute::Home))
            }
            (ScreenRoute::RemoveDish, ScreenCommand::Cancel) => {
                Step::Exit(ExitAction::Cancel(ScreenRoute::Home))
            }

            (ScreenRoute::Filter, ScreenCommand::Filter { course }) => {
                let course = course.as_deref().map(course_from_input);
                let view = render::filtered(
                    visit.working(),
                    course.as_ref(),
                    &self.settings.currency_symbol,
                );
                write!(self.output, "{view}")?;
                Step::Stay { rerender: false }
            }

            (
                ScreenRoute::Filter | ScreenRoute::Help,
                ScreenCommand::Back | ScreenCommand::Cancel,
            ) => Step::Exit(ExitAction::Back(ScreenRoute::Home)),

            (route, command) => {
                debug!(screen = %route, ?command, "command not available on this screen");
                writeln!(self.output, "That action is not available here.")?;
                Step::Stay { rerender: false }
            }
        };
        Ok(step)
    }

    fn confirm(&mut self, question: &str) -> Result<Confirmation> {
        let answer = self.prompt(&format!("{question} [y/N] "))?;
        Ok(answer
            .as_deref()
            .map(Confirmation::from_answer)
            .unwrap_or(Confirmation::Cancelled))
    }

    fn report(&mut self, context: NoticeContext, err: &MenuError) -> Result<()> {
        let notice = UserNotice::from_error(context, err);
        if !UserNotice::is_user_correctable(err) {
            warn!(context = ?notice.context(), error = %err, "menu operation failed");
        }
        self.notice(notice)
    }

    fn notice(&mut self, notice: UserNotice) -> Result<()> {
        write!(self.output, "{}", render::notice(&notice))?;
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
