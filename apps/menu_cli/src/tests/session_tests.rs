use std::io::Cursor;

use menu_core::{codec, IdStrategy};
use shared::{
    domain::CHEF_ROLE_FLAG,
    protocol::{PARAM_DISHES, PARAM_ROLE},
};

use super::*;

const SOUP_MENU: &str = r#"[{"id":"1","name":"Soup","description":"Butternut","course":"Starter","price":45.0}]"#;

fn scripted(script: &str) -> Session<Cursor<String>, Vec<u8>> {
    let settings = Settings {
        id_strategy: IdStrategy::Sequential,
        ..Settings::default()
    };
    Session::new(settings, Cursor::new(script.to_string()), Vec::new())
}

fn run_script(script: &str) -> String {
    let mut session = scripted(script);
    session.run().expect("session");
    String::from_utf8(session.output).expect("utf8 output")
}

fn chef_message(destination: ScreenRoute) -> OutboundMessage {
    let params = ScreenParams::new()
        .with(PARAM_ROLE, CHEF_ROLE_FLAG)
        .with(PARAM_DISHES, SOUP_MENU);
    OutboundMessage::new(destination, params, true)
}

fn last_home(output: &str) -> &str {
    output
        .rsplit("Christoffel's Menu")
        .next()
        .expect("home rendered")
}

#[test]
fn chef_adds_then_removes_dishes() {
    let output = run_script(
        "login chef\n\
         open add\n\
         add Bobotie | Spiced mince | Main | 120\n\
         open add\n\
         add Malva | Pudding | Dessert |\n\
         add Malva | Pudding | Dessert | 55\n\
         open remove\n\
         remove dish-1\n\
         n\n\
         remove dish-1\n\
         y\n\
         back\n\
         quit\n",
    );

    assert!(output.contains("Dish added successfully!"));
    assert!(output.contains("Error: Please fill in all fields (price is required)."));
    let home = last_home(&output);
    assert!(home.contains("Total Items: 1"), "{home}");
    assert!(home.contains("Malva"));
    assert!(!home.contains("Bobotie"));
}

#[test]
fn cancelled_removal_session_leaves_menu_untouched() {
    let output = run_script(
        "login chef\n\
         open add\n\
         add Soup | Butternut | Starter | 45\n\
         open remove\n\
         remove dish-1\n\
         yes\n\
         cancel\n\
         quit\n",
    );
    let home = last_home(&output);
    assert!(home.contains("Total Items: 1"), "{home}");
    assert!(home.contains("Soup"));
}

#[test]
fn reset_requires_confirmation() {
    let output = run_script(
        "login chef\n\
         open add\n\
         add Soup | Butternut | Starter | 45\n\
         reset\n\
         no\n\
         list\n\
         reset\n\
         y\n\
         quit\n",
    );
    let home = last_home(&output);
    assert!(home.contains("No dishes yet."), "{home}");
    assert!(output.contains("Total Items: 1"));
}

#[test]
fn viewer_cannot_open_editing_screens() {
    let output = run_script("login user\nopen add\nreset\nopen filter\nback\nquit\n");
    assert!(output.contains("Logged in as: User"));
    assert!(output.contains("Error: Only the chef can edit the menu."));
    assert!(output.contains("Error: Only the chef can reset the menu."));
    assert!(output.contains("Enter 'filter <course>' or 'back'."));
}

#[test]
fn logout_carries_menu_to_next_login() {
    let output = run_script(
        "login chef\n\
         open add\n\
         add Soup | Butternut | Starter | 45\n\
         logout\n\
         login user\n\
         quit\n",
    );
    let home = last_home(&output);
    assert!(home.contains("Logged in as: User"));
    assert!(home.contains("Soup"));
}

#[test]
fn end_of_input_ends_session() {
    let output = run_script("");
    assert!(output.contains("Welcome"));
}

#[test]
fn add_screen_returns_full_menu_to_home() {
    let mut session = scripted("add Malva | Pudding | Dessert | 55\n");
    let outbound = session
        .screen(chef_message(ScreenRoute::AddDish))
        .expect("screen")
        .expect("hand-off");

    assert_eq!(outbound.destination, ScreenRoute::Home);
    assert!(outbound.changed);
    assert_eq!(outbound.params.new_dish(), None);
    let menu = codec::decode(outbound.params.dishes()).expect("decode");
    assert_eq!(menu.len(), 2);
    assert_eq!(menu.list()[1].name, "Malva");
    assert!(session.carried.is_none());
}

#[test]
fn unchanged_hand_off_keeps_decoded_menu_for_next_screen() {
    let mut session = scripted("back\nquit\n");
    let outbound = session
        .screen(chef_message(ScreenRoute::Filter))
        .expect("screen")
        .expect("hand-off");

    assert!(!outbound.changed);
    assert_eq!(outbound.params.dishes(), Some(SOUP_MENU));
    let carried = session.carried.clone().expect("carried snapshot");
    assert_eq!(carried, codec::decode(Some(SOUP_MENU)).expect("decode"));

    assert_eq!(session.screen(outbound).expect("screen"), None);
    assert!(session.carried.is_none());
}
