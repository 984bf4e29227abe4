use colored::Colorize;

const REFERENCE: &str = r#"
A gallery manifest is a YAML file:

  title: Port of Marseille        # window/page title
  theme: dark                     # light (default) | dark
  interval: 5000                  # auto-rotation period, ms
  footer: (c) 2026 Marseille CVB  # shown at the page bottom
  about: |                        # free text for the About section
    Photographs from the old port, shot on film.
  slides:
    - image: photos/old-port.jpg  # path, relative to the manifest
      alt: Fishing boats at dawn  # shown when the image cannot load
      title: The Old Port
      description: Morning light over the quay.
    - image: photos/calanques.jpg
      title: Calanques

Only `slides` and each slide's `image` are required. Image paths are
resolved against the manifest's directory; PNG, JPEG and WebP decode.

While presenting:
  the carousel advances every `interval` ms, pauses while hovered, and
  resumes on leave; arrows and dots navigate manually; clicking the
  image expands it into the lightbox (Esc, the close button or a click
  on the backdrop collapses it).
"#;

const CARD: &str = r#"
  slides:               required, non-empty
    - image: <path>     required
      alt: <text>
      title: <text>
      description: <text>
  title | theme | interval | footer | about    optional
"#;

pub fn run(short: bool) {
    if short {
        println!("{}", "Gallery manifest — quick reference".bold());
        println!("{CARD}");
    } else {
        println!("{}", "Gallery manifest format".bold());
        println!("{REFERENCE}");
    }
}
