use crate::page::Page;

pub const NO_DESCRIPTION: &str = "No description available.";

pub async fn extract_description<P: Page + ?Sized>(page: &P) -> String {
    page.text_of_first(&["#description"])
        .await
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}
