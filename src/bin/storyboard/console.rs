//! Terminal rendering: notifications, the scene list and the preview.

use storyboard_editor::{MoveDirection, Notification, Notifier, Preview, Severity, StoryboardEditor};

/// Prints info notifications to stdout and errors to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!("[{}] {}", notification.title, notification.message),
            Severity::Error => eprintln!("[{}] {}", notification.title, notification.message),
        }
    }
}

pub fn print_input<N: Notifier>(editor: &StoryboardEditor<N>) {
    let input = editor.input();
    println!("  Style:       {}", input.style.label());
    println!("  Aspect:      {}", input.aspect_ratio);
    println!("  Resolution:  {}", input.resolution);
    if input.description.is_empty() {
        println!("  Description: (empty)");
    } else {
        println!("  Description: {}", input.description);
    }
}

/// One card per scene, with the move controls that are currently legal.
pub fn print_list<N: Notifier>(editor: &StoryboardEditor<N>) {
    if editor.is_empty() {
        println!("Storyboard is empty.");
        return;
    }
    for (index, scene) in editor.scenes().iter().enumerate() {
        let mut controls = Vec::new();
        if editor.can_move(index, MoveDirection::Up) {
            controls.push("up");
        }
        if editor.can_move(index, MoveDirection::Down) {
            controls.push("down");
        }
        controls.push("delete");

        println!("Scene {} [{}]", index + 1, controls.join(" | "));
        println!("  {}", scene.description);
        println!("  {}", scene.image_url);
    }
}

pub fn print_preview(preview: &Preview) {
    println!("========================================");
    println!("{}", preview.title);
    println!("{}", preview.description);
    println!("========================================");
    for entry in &preview.entries {
        println!();
        println!("{}", entry.label());
        println!("  image: {}", entry.image_url);
        println!("  {}", entry.description);
    }
}
