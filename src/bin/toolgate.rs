use std::path::PathBuf;

use toolgate_lib::speech::{SpeechClient, SpeechConfig, TtsRequest};
use toolgate_lib::tools::{ToolCallInput, ToolRegistry, ToolsConfig};

fn main() {
    let _ = dotenvy::dotenv();
    toolgate_lib::init_tracing();

    if let Err(error) = run() {
        eprintln!("toolgate failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "list" => list_tools(),
        "call" => {
            let name = args
                .next()
                .ok_or_else(|| "call requires a tool name".to_string())?;
            let raw_args = args.next().unwrap_or_else(|| "{}".to_string());
            call_tool(name, &raw_args)
        }
        "transcribe" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| "transcribe requires an audio file path".to_string())?;
            transcribe(path)
        }
        "speak" => {
            let rest: Vec<String> = args.collect();
            speak(rest)
        }
        other => Err(format!(
            "unknown command '{other}'. Use list, call, transcribe, or speak"
        )),
    }
}

fn registry() -> Result<ToolRegistry, String> {
    ToolRegistry::with_default_tools(&ToolsConfig::from_env()).map_err(|error| error.to_string())
}

fn list_tools() -> Result<(), String> {
    print!("{}", registry()?.tool_reference_for_prompt());
    Ok(())
}

fn call_tool(name: String, raw_args: &str) -> Result<(), String> {
    let args: serde_json::Value = serde_json::from_str(raw_args)
        .map_err(|error| format!("tool arguments must be JSON: {error}"))?;
    let output = registry()?
        .invoke(ToolCallInput { name, args })
        .map_err(|error| error.to_string())?;
    println!("{output}");
    Ok(())
}

fn transcribe(path: PathBuf) -> Result<(), String> {
    let client = SpeechClient::new(SpeechConfig::from_env()).map_err(|error| error.to_string())?;
    let transcript = client
        .transcribe_file(&path)
        .map_err(|error| format!("transcription failed: {error}"))?;
    println!("{}", transcript.text);
    Ok(())
}

fn speak(rest: Vec<String>) -> Result<(), String> {
    let mut output = PathBuf::from("response.mp3");
    let mut voice_id = None;
    let mut model_id = None;
    let mut words = Vec::new();

    let mut iter = rest.into_iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--out=") {
            output = PathBuf::from(value);
            continue;
        }
        if arg == "--out" {
            let value = iter
                .next()
                .ok_or_else(|| "--out requires a value".to_string())?;
            output = PathBuf::from(value);
            continue;
        }
        if let Some(value) = arg.strip_prefix("--voice=") {
            voice_id = Some(value.to_string());
            continue;
        }
        if arg == "--voice" {
            voice_id = Some(
                iter.next()
                    .ok_or_else(|| "--voice requires a value".to_string())?,
            );
            continue;
        }
        if let Some(value) = arg.strip_prefix("--model=") {
            model_id = Some(value.to_string());
            continue;
        }
        if arg == "--model" {
            model_id = Some(
                iter.next()
                    .ok_or_else(|| "--model requires a value".to_string())?,
            );
            continue;
        }
        words.push(arg);
    }

    let request = TtsRequest {
        text: words.join(" "),
        voice_id,
        model_id,
    };
    let client = SpeechClient::new(SpeechConfig::from_env()).map_err(|error| error.to_string())?;
    let audio = client
        .synthesize(&request)
        .map_err(|error| format!("speech synthesis failed: {error}"))?;

    std::fs::write(&output, &audio.bytes)
        .map_err(|error| format!("failed to write {}: {error}", output.display()))?;
    println!(
        "wrote {} bytes ({}, ~{:.1}s) to {}",
        audio.size_bytes(),
        audio.mime_type(),
        audio.duration_estimate(&request.text),
        output.display()
    );
    Ok(())
}

fn print_help() {
    println!("Schema-validated provider tools");
    println!();
    println!("Usage:");
    println!("  toolgate <command> [args]");
    println!();
    println!("Commands:");
    println!("  list                              Print every tool with its input schema");
    println!("  call <tool> [json-args]           Invoke a tool (ex: call brave_search '{{\"query\":\"rust\"}}')");
    println!("  transcribe <audio-file>           Transcribe an audio file");
    println!("  speak <text> [--out path] [--voice id] [--model id]");
    println!("                                    Synthesize speech to a file (default: response.mp3)");
    println!();
    println!("Environment:");
    println!("  BRAVE_API_KEY                     Brave Search subscription token");
    println!("  ELEVENLABS_API_KEY                Speech provider key");
    println!("  RUST_LOG                          Log filter (default: toolgate=debug,toolgate_lib=debug,info)");
    println!("  A .env file in the working directory is loaded first.");
}
