use leptos::prelude::*;

use crate::components::particle_sketch::ParticleSketchCanvas;

/// Particle sketch page
#[component]
pub fn Sketch() -> impl IntoView {
	view! {
		<div class="bubble-page">
			<h1>"Particles"</h1>
			<p class="subtitle">"Move the pointer over the canvas to release stars."</p>
			<div id="sketch">
				<ParticleSketchCanvas />
			</div>
		</div>
	}
}
