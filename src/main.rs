#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod capture;
#[cfg(target_os = "macos")]
mod defaults;
#[cfg(target_os = "macos")]
mod hotkey;
#[cfg(target_os = "macos")]
mod mirror;
#[cfg(target_os = "macos")]
mod screen;
#[cfg(target_os = "macos")]
mod statusbar;

#[cfg(target_os = "macos")]
fn main() {
    use objc2::runtime::ProtocolObject;
    use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSApplicationDelegate};
    use objc2_foundation::MainThreadMarker;

    facecam::logging::init_logging();

    let mtm = MainThreadMarker::new().expect("must run on main thread");

    let app = NSApplication::sharedApplication(mtm);
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    let delegate = app::AppDelegate::new(mtm);
    let delegate_proto: &ProtocolObject<dyn NSApplicationDelegate> =
        ProtocolObject::from_ref(&*delegate);
    app.setDelegate(Some(delegate_proto));

    app.run();
}

#[cfg(not(target_os = "macos"))]
fn main() {
    facecam::logging::init_logging();
    tracing::error!("FaceCam needs macOS: it is built on AppKit and AVFoundation");
    std::process::exit(1);
}
