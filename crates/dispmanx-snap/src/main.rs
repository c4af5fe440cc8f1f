//! Snapshot binary: capture one frame from a DispmanX display and
//! write it out as a PNG.

use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use dispmanx_snap::dispmanx::DispmanxSource;
use dispmanx_snap::sink;
use dispmanx_snap::source::{FrameSource, resolve_dimensions};
use vc_raster::{PixelFormat, Transform, assemble};

struct CliArgs {
    png_name: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
    format: PixelFormat,
    keep_alpha: bool,
    compression: Option<u8>,
    delay_secs: u64,
    display: u32,
    to_stdout: bool,
    verbose: bool,
}

fn usage() -> ! {
    eprintln!("Usage: dispmanx-snap [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p <file>   name of png file to create [default: snapshot.png]");
    eprintln!("  -w <width>  image width [default: screen width]");
    eprintln!("  -h <height> image height [default: screen height]");
    eprint!("  -t <type>   type of image captured, one of:");
    for format in PixelFormat::ALL {
        eprint!(" {}", format.name());
    }
    eprintln!(" [default: RGB888]");
    eprintln!("  -a          keep the alpha channel (RGBA types only)");
    eprintln!("  -c <0-9>    png compression level");
    eprintln!("  -d <secs>   delay in seconds before capturing");
    eprintln!("  -D <num>    display number [default: 0]");
    eprintln!("  -s          write png to stdout");
    eprintln!("  -v          verbose");
    process::exit(1);
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        png_name: PathBuf::from("snapshot.png"),
        width: None,
        height: None,
        format: PixelFormat::Rgb888,
        keep_alpha: false,
        compression: None,
        delay_secs: 0,
        display: 0,
        to_stdout: false,
        verbose: false,
    };

    let mut i = 1;
    while i < args.len() {
        let take_value = |i: &mut usize| -> String {
            *i += 1;
            args.get(*i).cloned().unwrap_or_else(|| usage())
        };
        match args[i].as_str() {
            "-p" => cli.png_name = PathBuf::from(take_value(&mut i)),
            "-w" => cli.width = Some(parse_number(&take_value(&mut i), "width")),
            "-h" => cli.height = Some(parse_number(&take_value(&mut i), "height")),
            "-t" => {
                let name = take_value(&mut i);
                cli.format = PixelFormat::from_name(&name).unwrap_or_else(|| {
                    eprintln!("unknown image type {name}");
                    process::exit(1);
                });
            }
            "-a" => cli.keep_alpha = true,
            "-c" => {
                let level = parse_number(&take_value(&mut i), "compression");
                if level > 9 {
                    eprintln!("compression level must be 0-9");
                    process::exit(1);
                }
                cli.compression = Some(level as u8);
            }
            "-d" => cli.delay_secs = u64::from(parse_number(&take_value(&mut i), "delay")),
            "-D" => cli.display = parse_number(&take_value(&mut i), "display"),
            "-s" => cli.to_stdout = true,
            "-v" => cli.verbose = true,
            _ => usage(),
        }
        i += 1;
    }

    cli
}

fn parse_number(s: &str, what: &str) -> u32 {
    s.parse().unwrap_or_else(|_| {
        eprintln!("invalid {what}: {s}");
        process::exit(1);
    })
}

fn main() {
    let cli = parse_args();

    if cli.width == Some(0) || cli.height == Some(0) {
        eprintln!("width and height must be positive");
        process::exit(1);
    }

    if cli.delay_secs > 0 {
        thread::sleep(Duration::from_secs(cli.delay_secs));
    }

    let mut source = DispmanxSource::open(cli.display).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let info = source.display_info().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let (width, height) =
        resolve_dimensions(&info, cli.width, cli.height).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });
    let transform = Transform::from_code(info.transform_code);

    // diagnostics go to stderr so -s can pipe the png through stdout
    if cli.verbose {
        eprintln!("screen width = {}", info.width);
        eprintln!("screen height = {}", info.height);
        eprintln!("image width = {width}");
        eprintln!("image height = {height}");
        eprintln!("image type = {}", cli.format.name());
        eprintln!("transform code = {:#x}", info.transform_code);
    }

    let captured = source.capture(cli.format, width, height).unwrap_or_else(|e| {
        eprintln!("capture failed: {e}");
        process::exit(1);
    });

    if cli.verbose {
        eprintln!(
            "captured {}x{}, pitch = {}",
            captured.width(),
            captured.height(),
            captured.pitch()
        );
    }

    let raster = assemble(&captured, transform, width, height, cli.keep_alpha).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let result = if cli.to_stdout {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        sink::write_png(&mut lock, &raster, cli.compression).and_then(|()| {
            lock.flush()?;
            Ok(())
        })
    } else {
        sink::save_png(&cli.png_name, &raster, cli.compression)
    };

    if let Err(e) = result {
        eprintln!("unable to write png: {e}");
        process::exit(1);
    }

    if cli.verbose && !cli.to_stdout {
        eprintln!("wrote {}", cli.png_name.display());
    }
}
