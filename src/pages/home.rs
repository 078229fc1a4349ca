use leptos::prelude::*;

use crate::components::bubble_chart::{BubbleChartCanvas, RawRecord};
use crate::data::{STAFF_CSV, parse_dataset};

const TOOLBAR: [(&str, &str); 2] = [("all", "All staff"), ("year", "By start year")];

/// Mode buttons, keyed by the display mode name.
#[component]
fn Toolbar(mode: ReadSignal<&'static str>, set_mode: WriteSignal<&'static str>) -> impl IntoView {
	view! {
		<div id="toolbar">
			{TOOLBAR
				.into_iter()
				.map(|(key, label)| {
					view! {
						<button
							id=key
							class="button"
							class:active=move || mode.get() == key
							on:click=move |_| set_mode.set(key)
						>
							{label}
						</button>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Staff bubble chart page
#[component]
pub fn Home() -> impl IntoView {
	let (mode, set_mode) = signal("all");
	let chart = parse_dataset(STAFF_CSV).map(|records: Vec<RawRecord>| {
		let data = Signal::derive(move || records.clone());
		view! { <BubbleChartCanvas data=data mode=mode /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="bubble-page">
				<h1>"Staff by grade"</h1>
				<p class="subtitle">"Bubble size is weekly hours. Hover a bubble for details."</p>
				<Toolbar mode=mode set_mode=set_mode />
				<div id="vis">{chart}</div>
			</div>
		</ErrorBoundary>
	}
}
