use console::Style;
use matchview_core::controller::SummaryView;
use matchview_core::model::ImageData;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn underline(s: &Styles, text: &str) {
    println!("  {}", s.title.apply_to(text));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(text.chars().count()))
    );
}

pub fn print_image_info(image: &ImageData, partners: usize) {
    let s = Styles::new();

    println!();
    underline(&s, &image.name);
    println!();

    println!("  {:<16}{}", s.label.apply_to("Id"), s.value.apply_to(image.id));
    match image.reported_size {
        Some(size) => println!(
            "  {:<16}{}",
            s.label.apply_to("Size"),
            s.value.apply_to(format!("{}x{}", size.width, size.height))
        ),
        None => println!(
            "  {:<16}{}",
            s.label.apply_to("Size"),
            s.disabled.apply_to("not reported")
        ),
    }
    println!(
        "  {:<16}{}",
        s.label.apply_to("Features"),
        s.value.apply_to(image.points.len())
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Triangulated"),
        s.good.apply_to(image.triangulated_count())
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Matched images"),
        s.value.apply_to(partners)
    );
    println!();
}

pub fn print_pair_summary(name_a: &str, name_b: &str, view: &SummaryView) {
    let s = Styles::new();

    println!();
    underline(&s, "Match Statistics");
    println!();
    println!("  {:<16}{}", s.label.apply_to("Image A"), s.value.apply_to(name_a));
    println!("  {:<16}{}", s.label.apply_to("Image B"), s.value.apply_to(name_b));
    println!();

    match view {
        SummaryView::Ready(_) => {
            println!("  {}", s.header.apply_to("Correspondences"));
            for (label, value) in view.rows() {
                println!("    {:<18}{}", s.label.apply_to(label), s.value.apply_to(value));
            }
        }
        _ => {
            for (message, _) in view.rows() {
                println!("  {}", s.disabled.apply_to(message));
            }
        }
    }
    println!();
}
