fn main() {
    println!("cargo:rerun-if-changed=assets/logo.ico");

    // Embed the logo as the executable icon on Windows hosts.
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/logo.ico");
        res.set("FileDescription", "Exoplanet data dashboard");
        res.compile().expect("compiling Windows resources");
    }
}
