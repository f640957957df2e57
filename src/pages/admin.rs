//! Admin Page
//!
//! Ad-hoc query console against the server's admin endpoint. Results and
//! errors render inline; this page is plumbing, not a designed surface.

use leptos::*;

use crate::api;

type QueryRows = Vec<serde_json::Map<String, serde_json::Value>>;

/// Admin query console page
#[component]
pub fn Admin() -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let (running, set_running) = create_signal(false);
    let (result, set_result) = create_signal(None::<Result<QueryRows, String>>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let q = query.get();
        if q.is_empty() {
            return;
        }

        set_running.set(true);
        spawn_local(async move {
            set_result.set(Some(api::run_admin_query(&q).await));
            set_running.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Admin"</h1>
                <p class="text-gray-400 mt-1">"Run a query against the activity store"</p>
            </div>

            // Query form
            <section class="bg-gray-800 rounded-xl p-6">
                <form on:submit=on_submit class="space-y-4">
                    <textarea
                        placeholder="SELECT * FROM activities LIMIT 10"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        rows="3"
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 font-mono text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none
                               resize-none"
                    />
                    <button
                        type="submit"
                        disabled=move || running.get() || query.get().is_empty()
                        class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if running.get() { "Running..." } else { "Run Query" }}
                    </button>
                </form>
            </section>

            // Results
            <section class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                {move || match result.get() {
                    None => view! {
                        <p class="text-gray-400 text-sm">"No query run yet."</p>
                    }
                    .into_view(),
                    Some(Err(e)) => view! {
                        <p class="text-red-400">"Error: " {e}</p>
                    }
                    .into_view(),
                    Some(Ok(rows)) => {
                        if rows.is_empty() {
                            view! { <p class="text-gray-400">"No rows returned."</p> }.into_view()
                        } else {
                            let columns: Vec<String> = rows[0].keys().cloned().collect();
                            view! {
                                <table class="w-full text-left text-sm">
                                    <thead>
                                        <tr>
                                            {columns
                                                .iter()
                                                .map(|c| view! {
                                                    <th class="border-b border-gray-600 py-2 pr-4">
                                                        {c.clone()}
                                                    </th>
                                                })
                                                .collect_view()}
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows
                                            .iter()
                                            .map(|row| view! {
                                                <tr>
                                                    {columns
                                                        .iter()
                                                        .map(|c| view! {
                                                            <td class="border-b border-gray-700 py-2 pr-4">
                                                                {row.get(c).map(render_value).unwrap_or_default()}
                                                            </td>
                                                        })
                                                        .collect_view()}
                                                </tr>
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
                            }
                            .into_view()
                        }
                    }
                }}
            </section>
        </div>
    }
}

/// Render a JSON cell value without quoting plain strings
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_value_strings_unquoted() {
        assert_eq!(render_value(&serde_json::json!("Read")), "Read");
        assert_eq!(render_value(&serde_json::json!(2.5)), "2.5");
        assert_eq!(render_value(&serde_json::json!(null)), "null");
    }
}
