//! Plain-text views of a working collection.

use std::fmt::Write as _;

use menu_core::{
    aggregate::format_price, filter_by_course, group_by_course, summarize, MenuCollection,
};
use screen_bridge::{NoticeSeverity, UserNotice};
use shared::domain::{Course, DishRecord, Role};

pub fn login(default_role: &str) -> String {
    format!(
        "SSIK NOVA\nWelcome\nSelect login type: 'login chef' or 'login user' (Enter for '{default_role}')\n"
    )
}

pub fn home(menu: &MenuCollection, role: Role, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Christoffel's Menu");
    let _ = writeln!(out, "Logged in as: {}", role.display_name());
    let _ = writeln!(out, "\nCurrent Menu");
    if menu.is_empty() {
        let _ = writeln!(out, "No dishes yet. Add a dish to get started.");
    } else {
        for dish in menu.iter() {
            dish_line(&mut out, dish, currency);
        }
    }

    let summary = summarize(menu);
    let _ = writeln!(out, "\nTotal Items: {}", summary.count);
    let _ = writeln!(
        out,
        "Average Price: {}",
        format_price(summary.average_price, currency)
    );

    let _ = writeln!(out);
    if role.can_edit() {
        let _ = writeln!(
            out,
            "Actions: open add | open remove | open filter | open help | reset | logout | quit"
        );
    } else {
        let _ = writeln!(out, "Actions: open filter | open help | logout | quit");
    }
    out
}

pub fn add_form() -> String {
    let courses = Course::well_known().map(|course| course.label().to_string());
    format!(
        "Add New Dish\nEnter: add <name> | <description> | <course> | <price>\n\
         Courses: {}\nOr 'cancel' to return without changes.\n",
        courses.join(", ")
    )
}

pub fn removal_list(menu: &MenuCollection, currency: &str) -> String {
    let mut out = String::from("Remove Dish\n");
    if menu.is_empty() {
        let _ = writeln!(out, "The menu is empty. Nothing to remove.");
    } else {
        for dish in menu.iter() {
            let _ = writeln!(
                out,
                "  [{}] {}  {}  ({})",
                dish.id,
                dish.name,
                format_price(dish.price, currency),
                dish.course
            );
        }
        let _ = writeln!(out, "Enter 'remove <id>' to delete a dish.");
    }
    let _ = writeln!(out, "'back' keeps the changes, 'cancel' discards them.");
    out
}

/// Every course with its statistics, or one course when `course` is given.
pub fn filtered(menu: &MenuCollection, course: Option<&Course>, currency: &str) -> String {
    let mut out = String::new();
    match course {
        Some(course) => {
            let dishes = filter_by_course(menu, course);
            let _ = writeln!(out, "{} ({})", course, dishes.len());
            if dishes.is_empty() {
                let _ = writeln!(out, "No dishes in this course.");
            }
            for dish in dishes {
                dish_line(&mut out, dish, currency);
            }
        }
        None => {
            let groups = group_by_course(menu);
            if groups.is_empty() {
                let _ = writeln!(out, "No dishes yet.");
            }
            for group in groups {
                let summary = group.summary();
                let _ = writeln!(
                    out,
                    "{}: {} item(s), average {}",
                    group.label(),
                    summary.count,
                    format_price(summary.average_price, currency)
                );
                for dish in &group.dishes {
                    dish_line(&mut out, dish, currency);
                }
            }
        }
    }
    let _ = writeln!(out, "Enter 'filter <course>' or 'back'.");
    out
}

pub fn help(role: Role) -> String {
    let mut out = String::from("Help\n");
    out.push_str("  list             show the current menu\n");
    out.push_str("  open filter      view dishes by course\n");
    if role.can_edit() {
        out.push_str("  open add         add a dish to the menu\n");
        out.push_str("  open remove      delete dishes from the menu\n");
        out.push_str("  reset            clear all dishes (asks first)\n");
    }
    out.push_str("  logout           return to the login screen\n");
    out.push_str("  back             return to the previous screen\n");
    out
}

pub fn notice(notice: &UserNotice) -> String {
    let prefix = match notice.severity() {
        NoticeSeverity::Info => "",
        NoticeSeverity::Warning => "Warning: ",
        NoticeSeverity::Error => "Error: ",
    };
    format!("{prefix}{}\n", notice.message())
}

fn dish_line(out: &mut String, dish: &DishRecord, currency: &str) {
    let _ = writeln!(
        out,
        "  {} - {}  [{}]  {}",
        dish.name,
        dish.description,
        dish.course,
        format_price(dish.price, currency)
    );
}
