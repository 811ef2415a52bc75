use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-6 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col items-start gap-1.5 px-6"}
    clx! {CardTitle, h2, "leading-none font-semibold"}
    clx! {CardContent, div, "px-6"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardFooter, footer, "flex flex-wrap items-center px-6", "gap-2"}

    // Note grids on the list pages.
    clx! {CardGrid, div, "grid gap-4 sm:grid-cols-2 lg:grid-cols-3"}
    clx! {StatTile, div, "flex flex-col gap-1 rounded-lg border bg-card px-4 py-3"}
}

#[allow(unused_imports)]
pub use components::*;
