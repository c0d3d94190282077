//! Prompt construction for page and search generation.

use crate::completion::ChatMessage;

/// Persona sent as the system turn of every generation.
pub const SYSTEM_PROMPT: &str = "You are an expert in creating realistic webpages. You do not create sample pages, \
instead you create webpages that are completely realistic and look as if they really existed on the web. You do not \
respond with anything but HTML, starting your messages with <!DOCTYPE html> and ending them with </html>. If a \
requested page is not a HTML document, for example a CSS or Javascript file, write that language instead of writing \
any HTML. If the requested page is instead an image file or other non-text resource, attempt to generate an \
appropriate resource for it instead of writing any HTML. You use very little to no images at all in your HTML, CSS \
or JS.";

/// Primed assistant turn the model continues from.
pub const DOCUMENT_PREAMBLE: &str = "<!DOCTYPE html>
<html lang=\"en\">
    <head>
        <meta charset=\"utf-8\">";

/// User turn asking for one page of a fictional site.
pub fn page_prompt(site: &str, path: &str) -> String {
    format!(
        "Give me a classic geocities-style webpage from the fictional site of '{site}' at the resource path of \
         '{path}'. Make sure all links generated either link to an external website, or if they link to another \
         resource on the current website have the current url prepended ({site}) to them. For example if a link on \
         the page has the href of 'help' or '/help', it should be replaced with '{site}/help'."
    )
}

/// User turn asking for a fabricated results page.
pub fn search_prompt(query: &str) -> String {
    format!(
        "Generate the search results page for a fictitious search engine where the search query is '{query}'. \
         Please include at least 10 results to different fictitious websites that relate to the query. DO NOT link \
         to any real websites, every link should lead to a fictitious website. Feel free to add a bit of CSS to make \
         the page look nice. Each search result will link to its own unique website that has nothing to do with the \
         search engine. Make sure each fictitious website has a unique and somewhat creative URL. Don't mention that \
         the results are fictitious."
    )
}

/// The three turns of a generation: persona, request, primed preamble.
pub fn messages(user_prompt: String) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_prompt),
        ChatMessage::assistant(DOCUMENT_PREAMBLE),
    ]
}

/// Join the primed preamble with the model's continuation.
///
/// Models that echo the whole document are taken verbatim.
pub fn assemble_document(completion: &str) -> String {
    let starts_with_doctype = completion
        .trim_start()
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));

    if starts_with_doctype { completion.to_string() } else { format!("{DOCUMENT_PREAMBLE}{completion}") }
}
